//! SQLite-backed catalog store
//!
//! Owns every SQL statement in the crate. Ids are assigned by the database
//! (`AUTOINCREMENT`), so they increase monotonically and are never reused,
//! and unfiltered listings ordered by id equal creation order.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::{
    models::{Course, CourseFilter, Student, StudentFilter},
    Error, Result,
};

const COURSE_COLUMNS: &str = "id, name, created_at";

#[derive(Clone)]
pub struct CatalogStore {
    pool: SqlitePool,
}

/// Student row without the enrollment set; assembled into [`Student`] after
/// the join-table lookup.
#[derive(Debug, sqlx::FromRow)]
struct StudentRow {
    id: i64,
    name: String,
    created_at: DateTime<Utc>,
}

impl CatalogStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // ------------------------------------------------------------------
    // Courses
    // ------------------------------------------------------------------

    /// List courses matching the filter. The most specific predicate wins:
    /// `id` over `name`; with neither, all courses in creation order.
    pub async fn list_courses(&self, filter: &CourseFilter) -> Result<Vec<Course>> {
        let courses = if let Some(id) = filter.id {
            sqlx::query_as::<_, Course>(&format!(
                "SELECT {COURSE_COLUMNS} FROM courses WHERE id = ?"
            ))
            .bind(id)
            .fetch_all(&self.pool)
            .await?
        } else if let Some(name) = &filter.name {
            sqlx::query_as::<_, Course>(&format!(
                "SELECT {COURSE_COLUMNS} FROM courses WHERE name = ? ORDER BY id"
            ))
            .bind(name)
            .fetch_all(&self.pool)
            .await?
        } else {
            sqlx::query_as::<_, Course>(&format!(
                "SELECT {COURSE_COLUMNS} FROM courses ORDER BY id"
            ))
            .fetch_all(&self.pool)
            .await?
        };

        Ok(courses)
    }

    pub async fn get_course(&self, id: i64) -> Result<Course> {
        sqlx::query_as::<_, Course>(&format!(
            "SELECT {COURSE_COLUMNS} FROM courses WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| course_not_found(id))
    }

    pub async fn insert_course(&self, name: &str) -> Result<Course> {
        let course = sqlx::query_as::<_, Course>(&format!(
            "INSERT INTO courses (name, created_at) VALUES (?, ?) RETURNING {COURSE_COLUMNS}"
        ))
        .bind(name)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(course)
    }

    /// Update a course, leaving `NULL`-bound fields unchanged.
    pub async fn update_course(&self, id: i64, name: Option<&str>) -> Result<Course> {
        sqlx::query_as::<_, Course>(&format!(
            "UPDATE courses SET name = COALESCE(?, name) WHERE id = ? RETURNING {COURSE_COLUMNS}"
        ))
        .bind(name)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| course_not_found(id))
    }

    /// Delete a course. Enrollment rows referencing it are removed by the
    /// `ON DELETE CASCADE` constraint.
    pub async fn delete_course(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM courses WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(course_not_found(id));
        }

        Ok(())
    }

    /// Course ids from `ids` that do not exist.
    pub async fn missing_course_ids(&self, ids: &[i64]) -> Result<Vec<i64>> {
        let mut missing = Vec::new();
        for &id in ids {
            let exists: Option<i64> = sqlx::query_scalar("SELECT id FROM courses WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
            if exists.is_none() {
                missing.push(id);
            }
        }
        Ok(missing)
    }

    // ------------------------------------------------------------------
    // Students
    // ------------------------------------------------------------------

    /// List students matching the filter. Precedence: `id`, `name`, then
    /// `course` (students enrolled in the given course).
    pub async fn list_students(&self, filter: &StudentFilter) -> Result<Vec<Student>> {
        let rows = if let Some(id) = filter.id {
            sqlx::query_as::<_, StudentRow>(
                "SELECT id, name, created_at FROM students WHERE id = ?",
            )
            .bind(id)
            .fetch_all(&self.pool)
            .await?
        } else if let Some(name) = &filter.name {
            sqlx::query_as::<_, StudentRow>(
                "SELECT id, name, created_at FROM students WHERE name = ? ORDER BY id",
            )
            .bind(name)
            .fetch_all(&self.pool)
            .await?
        } else if let Some(course_id) = filter.course {
            sqlx::query_as::<_, StudentRow>(
                "SELECT s.id, s.name, s.created_at FROM students s \
                 JOIN enrollments e ON e.student_id = s.id \
                 WHERE e.course_id = ? ORDER BY s.id",
            )
            .bind(course_id)
            .fetch_all(&self.pool)
            .await?
        } else {
            sqlx::query_as::<_, StudentRow>(
                "SELECT id, name, created_at FROM students ORDER BY id",
            )
            .fetch_all(&self.pool)
            .await?
        };

        let mut students = Vec::with_capacity(rows.len());
        for row in rows {
            let courses = self.enrolled_course_ids(row.id).await?;
            students.push(assemble_student(row, courses));
        }

        Ok(students)
    }

    pub async fn get_student(&self, id: i64) -> Result<Student> {
        let row = sqlx::query_as::<_, StudentRow>(
            "SELECT id, name, created_at FROM students WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| student_not_found(id))?;

        let courses = self.enrolled_course_ids(row.id).await?;
        Ok(assemble_student(row, courses))
    }

    /// Insert a student and their enrollment rows in one transaction.
    /// Callers must have verified that every course id exists.
    pub async fn insert_student(&self, name: &str, course_ids: &[i64]) -> Result<Student> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, StudentRow>(
            "INSERT INTO students (name, created_at) VALUES (?, ?) RETURNING id, name, created_at",
        )
        .bind(name)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await?;

        for course_id in course_ids {
            sqlx::query("INSERT INTO enrollments (student_id, course_id) VALUES (?, ?)")
                .bind(row.id)
                .bind(course_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        Ok(assemble_student(row, course_ids.to_vec()))
    }

    /// Update a student. A `Some` enrollment list replaces the set
    /// wholesale; `None` leaves it untouched.
    pub async fn update_student(
        &self,
        id: i64,
        name: Option<&str>,
        course_ids: Option<&[i64]>,
    ) -> Result<Student> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, StudentRow>(
            "UPDATE students SET name = COALESCE(?, name) WHERE id = ? \
             RETURNING id, name, created_at",
        )
        .bind(name)
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| student_not_found(id))?;

        if let Some(course_ids) = course_ids {
            sqlx::query("DELETE FROM enrollments WHERE student_id = ?")
                .bind(id)
                .execute(&mut *tx)
                .await?;
            for course_id in course_ids {
                sqlx::query("INSERT INTO enrollments (student_id, course_id) VALUES (?, ?)")
                    .bind(id)
                    .bind(course_id)
                    .execute(&mut *tx)
                    .await?;
            }
        }

        let courses: Vec<i64> = sqlx::query_scalar(
            "SELECT course_id FROM enrollments WHERE student_id = ? ORDER BY course_id",
        )
        .bind(id)
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(assemble_student(row, courses))
    }

    pub async fn delete_student(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM students WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(student_not_found(id));
        }

        Ok(())
    }

    async fn enrolled_course_ids(&self, student_id: i64) -> Result<Vec<i64>> {
        let ids = sqlx::query_scalar(
            "SELECT course_id FROM enrollments WHERE student_id = ? ORDER BY course_id",
        )
        .bind(student_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(ids)
    }
}

fn assemble_student(row: StudentRow, courses: Vec<i64>) -> Student {
    Student {
        id: row.id,
        name: row.name,
        courses,
        created_at: row.created_at,
    }
}

fn course_not_found(id: i64) -> Error {
    Error::NotFound(format!("course {id} not found"))
}

fn student_not_found(id: i64) -> Error {
    Error::NotFound(format!("student {id} not found"))
}
