//! Student service - decode, validate, enforce enrollment integrity

use crate::{
    db::CatalogStore,
    models::{decode, CreateStudent, Student, StudentFilter, UpdateStudent},
    Error, Result,
};
use serde_json::Value as JsonValue;
use validator::Validate;

pub struct StudentService {
    store: CatalogStore,
}

impl StudentService {
    pub fn new(store: CatalogStore) -> Self {
        Self { store }
    }

    pub async fn list(&self, filter: StudentFilter) -> Result<Vec<Student>> {
        self.store.list_students(&filter).await
    }

    pub async fn get(&self, id: i64) -> Result<Student> {
        self.store.get_student(id).await
    }

    pub async fn create(&self, payload: JsonValue) -> Result<Student> {
        let payload: CreateStudent = decode(payload)?;
        payload.validate()?;

        let course_ids = normalize_course_ids(payload.courses);
        self.ensure_courses_exist(&course_ids).await?;

        let student = self.store.insert_student(&payload.name, &course_ids).await?;
        tracing::debug!(
            student_id = student.id,
            enrollments = student.courses.len(),
            "student created"
        );
        Ok(student)
    }

    /// Partial update (PATCH): only provided fields change. An explicit
    /// `courses` list replaces the enrollment set.
    pub async fn update(&self, id: i64, payload: JsonValue) -> Result<Student> {
        let patch: UpdateStudent = decode(payload)?;
        patch.validate()?;

        let course_ids = patch.courses.map(normalize_course_ids);
        if let Some(ids) = &course_ids {
            self.ensure_courses_exist(ids).await?;
        }

        self.store
            .update_student(id, patch.name.as_deref(), course_ids.as_deref())
            .await
    }

    /// Full update (PUT): `name` is required; an omitted `courses` list
    /// leaves enrollment unchanged.
    pub async fn replace(&self, id: i64, payload: JsonValue) -> Result<Student> {
        let payload: UpdateStudent = decode(payload)?;
        payload.validate()?;

        let name = payload
            .name
            .ok_or_else(|| Error::Validation("missing field `name`".to_string()))?;

        let course_ids = payload.courses.map(normalize_course_ids);
        if let Some(ids) = &course_ids {
            self.ensure_courses_exist(ids).await?;
        }

        self.store
            .update_student(id, Some(&name), course_ids.as_deref())
            .await
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        self.store.delete_student(id).await?;
        tracing::debug!(student_id = id, "student deleted");
        Ok(())
    }

    async fn ensure_courses_exist(&self, course_ids: &[i64]) -> Result<()> {
        if course_ids.is_empty() {
            return Ok(());
        }

        let missing = self.store.missing_course_ids(course_ids).await?;
        if !missing.is_empty() {
            let ids: Vec<String> = missing.iter().map(|id| id.to_string()).collect();
            return Err(Error::Validation(format!(
                "unknown course ids: {}",
                ids.join(", ")
            )));
        }

        Ok(())
    }
}

/// Sort and dedupe enrollment targets so the stored set matches the order
/// reads return them in.
fn normalize_course_ids(mut ids: Vec<i64>) -> Vec<i64> {
    ids.sort_unstable();
    ids.dedup();
    ids
}
