//! Course service - decode, validate, persist

use crate::{
    db::CatalogStore,
    models::{decode, Course, CourseFilter, CreateCourse, UpdateCourse},
    Result,
};
use serde_json::Value as JsonValue;
use validator::Validate;

pub struct CourseService {
    store: CatalogStore,
}

impl CourseService {
    pub fn new(store: CatalogStore) -> Self {
        Self { store }
    }

    pub async fn list(&self, filter: CourseFilter) -> Result<Vec<Course>> {
        self.store.list_courses(&filter).await
    }

    pub async fn get(&self, id: i64) -> Result<Course> {
        self.store.get_course(id).await
    }

    pub async fn create(&self, payload: JsonValue) -> Result<Course> {
        let payload: CreateCourse = decode(payload)?;
        payload.validate()?;

        let course = self.store.insert_course(&payload.name).await?;
        tracing::debug!(course_id = course.id, "course created");
        Ok(course)
    }

    /// Partial update (PATCH): only provided fields change.
    pub async fn update(&self, id: i64, payload: JsonValue) -> Result<Course> {
        let patch: UpdateCourse = decode(payload)?;
        patch.validate()?;

        self.store.update_course(id, patch.name.as_deref()).await
    }

    /// Full update (PUT): the complete payload is required.
    pub async fn replace(&self, id: i64, payload: JsonValue) -> Result<Course> {
        let payload: CreateCourse = decode(payload)?;
        payload.validate()?;

        self.store.update_course(id, Some(&payload.name)).await
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        self.store.delete_course(id).await?;
        tracing::debug!(course_id = id, "course deleted");
        Ok(())
    }
}
