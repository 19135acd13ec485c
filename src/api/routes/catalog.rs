use crate::api::handlers::{courses, students};
use crate::state::AppState;
use axum::{routing::get, Router};

/// Routes for the `/api/v1` catalog surface.
///
/// Clients of this API traditionally use trailing slashes, so every route
/// is registered in both forms.
pub fn catalog_routes() -> Router<AppState> {
    let mut router = Router::new();

    for path in ["/courses", "/courses/"] {
        router = router.route(
            path,
            get(courses::list_courses).post(courses::create_course),
        );
    }
    for path in ["/courses/:id", "/courses/:id/"] {
        router = router.route(
            path,
            get(courses::get_course)
                .put(courses::replace_course)
                .patch(courses::update_course)
                .delete(courses::delete_course),
        );
    }

    for path in ["/students", "/students/"] {
        router = router.route(
            path,
            get(students::list_students).post(students::create_student),
        );
    }
    for path in ["/students/:id", "/students/:id/"] {
        router = router.route(
            path,
            get(students::get_student)
                .put(students::replace_student)
                .patch(students::update_student)
                .delete(students::delete_student),
        );
    }

    router
}
