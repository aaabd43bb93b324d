//! Business rules for categories.

use rusqlite::Connection;

use crate::{
    Error,
    category::{Category, CategoryId, NewCategory},
    db::{Entity, Insert, delete_by_id},
    entity::{get_all_entities, get_entity},
    error::ServiceResult,
};

/// Resolves category IDs for the services that reference categories.
pub trait CategoryLookup {
    /// Get the category with the ID `category_id`.
    ///
    /// # Errors
    /// Returns a [crate::ErrorKind::NotFound] entry if the category does not exist.
    fn get_category(&self, category_id: CategoryId) -> ServiceResult<Category>;
}

/// Creates, retrieves and deletes categories.
#[derive(Debug, Clone, Copy)]
pub struct CategoryService<'a> {
    connection: &'a Connection,
}

impl<'a> CategoryService<'a> {
    /// Create a category service that reads and writes through `connection`.
    pub fn new(connection: &'a Connection) -> Self {
        Self { connection }
    }

    /// Create a category.
    ///
    /// # Errors
    /// Returns a [crate::ErrorKind::Validation] entry if `name` is empty or only whitespace.
    pub fn add_category(&self, name: &str) -> ServiceResult<Category> {
        if name.trim().is_empty() {
            return Err(Error::validation("Category name cannot be empty"));
        }

        NewCategory {
            name: name.to_owned(),
        }
        .insert(self.connection)
    }

    /// Get the category with the ID `category_id`.
    pub fn get_category(&self, category_id: CategoryId) -> ServiceResult<Category> {
        get_entity(category_id, self.connection)
    }

    /// Get all categories.
    pub fn get_all_categories(&self) -> ServiceResult<Vec<Category>> {
        get_all_entities(self.connection)
    }

    /// Delete the category with the ID `category_id`.
    ///
    /// Accounts and vendors that use the category as their default lose their default category.
    ///
    /// # Errors
    /// Returns a [crate::ErrorKind::NotFound] entry if the category does not exist.
    pub fn delete_category(&self, category_id: CategoryId) -> ServiceResult<bool> {
        if !delete_by_id::<Category>(category_id, self.connection)? {
            return Err(Error::not_found(format!(
                "{} {category_id} not found",
                Category::NAME
            )));
        }

        Ok(true)
    }
}

impl CategoryLookup for CategoryService<'_> {
    fn get_category(&self, category_id: CategoryId) -> ServiceResult<Category> {
        CategoryService::get_category(self, category_id)
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        ErrorKind, category::CategoryService, test_utils::must_create_test_connection,
    };

    #[test]
    fn add_category_succeeds() {
        let connection = must_create_test_connection();
        let service = CategoryService::new(&connection);

        let category = service.add_category("test category").unwrap();

        assert!(category.id > 0);
        assert_eq!(category.name, "test category");
        assert_eq!(service.get_category(category.id), Ok(category));
    }

    #[test]
    fn add_category_fails_on_blank_name() {
        let connection = must_create_test_connection();

        let error = CategoryService::new(&connection)
            .add_category(" \t")
            .unwrap_err();

        assert!(error.has_kind(ErrorKind::Validation));
    }

    #[test]
    fn get_missing_category_is_not_found() {
        let connection = must_create_test_connection();

        let error = CategoryService::new(&connection)
            .get_category(-1)
            .unwrap_err();

        assert!(error.has_kind(ErrorKind::NotFound));
    }

    #[test]
    fn delete_category_then_get_is_not_found() {
        let connection = must_create_test_connection();
        let service = CategoryService::new(&connection);
        let category = service.add_category("test category").unwrap();

        assert_eq!(service.delete_category(category.id), Ok(true));

        let error = service.get_category(category.id).unwrap_err();
        assert!(error.has_kind(ErrorKind::NotFound));
    }

    #[test]
    fn delete_missing_category_is_not_found() {
        let connection = must_create_test_connection();

        let error = CategoryService::new(&connection)
            .delete_category(-1)
            .unwrap_err();

        assert_eq!(error.to_string(), "Category -1 not found");
    }

    #[test]
    fn get_all_categories_lists_added_categories() {
        let connection = must_create_test_connection();
        let service = CategoryService::new(&connection);
        assert_eq!(service.get_all_categories(), Ok(vec![]));

        service.add_category("Food").unwrap();
        service.add_category("Rent").unwrap();

        assert_eq!(service.get_all_categories().unwrap().len(), 2);
    }
}
