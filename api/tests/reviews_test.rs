mod helpers;

#[cfg(test)]
mod tests {
    use crate::helpers::make_test_app;
    use api::auth::generate_jwt;
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode},
    };
    use db::models::{course::Model as CourseModel, course_student, user::Model as UserModel};
    use sea_orm::DatabaseConnection;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    struct TestData {
        student: UserModel,
        outsider: UserModel,
        course: CourseModel,
    }

    async fn setup_test_data(db: &DatabaseConnection) -> TestData {
        let student = UserModel::create(
            db,
            "thandi@example.com",
            "Thandi",
            "Dlamini",
            "password1",
            false,
        )
        .await
        .unwrap();

        let outsider = UserModel::create(
            db,
            "peter@example.com",
            "Peter",
            "van Wyk",
            "password2",
            false,
        )
        .await
        .unwrap();

        let course = CourseModel::create(db, "Software Engineering")
            .await
            .unwrap();

        course_student::Model::enroll(db, course.id, student.id)
            .await
            .unwrap();

        TestData {
            student,
            outsider,
            course,
        }
    }

    fn post_review(course_id: i64, token: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(format!("/api/courses/{}/reviews", course_id))
            .header("Authorization", format!("Bearer {}", token))
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_json(uri: &str) -> Request<Body> {
        Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn submit_rating(app: &Router, data: &TestData, user: &UserModel, rating: i32) {
        let (token, _) = generate_jwt(user.id, user.admin);
        let req = post_review(
            data.course.id,
            &token,
            json!({ "rating": rating, "review": "review text" }),
        );
        let response = app.clone().oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn create_review_success_and_average_reflects_it() {
        let (app, app_state) = make_test_app().await;
        let data = setup_test_data(app_state.db()).await;
        let (token, _) = generate_jwt(data.student.id, data.student.admin);

        let req = post_review(
            data.course.id,
            &token,
            json!({ "rating": 5, "review": "Excellent material" }),
        );
        let response = app.clone().oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "Rating and review created successfully");
        assert_eq!(body["data"]["rating"], 5);
        assert_eq!(body["data"]["review"], "Excellent material");
        assert_eq!(body["data"]["course_id"], data.course.id);
        assert_eq!(body["data"]["user_id"], data.student.id);

        let uri = format!("/api/courses/{}/reviews/average", data.course.id);
        let response = app.oneshot(get_json(&uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["data"]["has_data"], true);
        assert_eq!(body["data"]["average"].as_f64().unwrap(), 5.0);
    }

    #[tokio::test]
    async fn create_review_missing_fields() {
        let (app, app_state) = make_test_app().await;
        let data = setup_test_data(app_state.db()).await;
        let (token, _) = generate_jwt(data.student.id, data.student.admin);

        let req = post_review(data.course.id, &token, json!({ "rating": 4 }));
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Missing required fields: rating or review");
    }

    #[tokio::test]
    async fn create_review_rating_out_of_range() {
        let (app, app_state) = make_test_app().await;
        let data = setup_test_data(app_state.db()).await;
        let (token, _) = generate_jwt(data.student.id, data.student.admin);

        for rating in [0, 6] {
            let req = post_review(
                data.course.id,
                &token,
                json!({ "rating": rating, "review": "out of range" }),
            );
            let response = app.clone().oneshot(req).await.unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        }
    }

    #[tokio::test]
    async fn create_review_not_enrolled() {
        let (app, app_state) = make_test_app().await;
        let data = setup_test_data(app_state.db()).await;
        let (token, _) = generate_jwt(data.outsider.id, data.outsider.admin);

        let req = post_review(
            data.course.id,
            &token,
            json!({ "rating": 4, "review": "never attended" }),
        );
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = body_json(response).await;
        assert_eq!(body["message"], "Student is not enrolled in the course");
    }

    #[tokio::test]
    async fn create_review_nonexistent_course_looks_like_not_enrolled() {
        let (app, app_state) = make_test_app().await;
        let data = setup_test_data(app_state.db()).await;
        let (token, _) = generate_jwt(data.student.id, data.student.admin);

        let req = post_review(
            data.course.id + 999,
            &token,
            json!({ "rating": 4, "review": "ghost course" }),
        );
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = body_json(response).await;
        assert_eq!(body["message"], "Student is not enrolled in the course");
    }

    #[tokio::test]
    async fn create_review_duplicate_forbidden() {
        let (app, app_state) = make_test_app().await;
        let data = setup_test_data(app_state.db()).await;
        let (token, _) = generate_jwt(data.student.id, data.student.admin);

        let req = post_review(
            data.course.id,
            &token,
            json!({ "rating": 5, "review": "first take" }),
        );
        let response = app.clone().oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let req = post_review(
            data.course.id,
            &token,
            json!({ "rating": 1, "review": "second take" }),
        );
        let response = app.clone().oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let body = body_json(response).await;
        assert_eq!(body["message"], "Course is already reviewed by the user");

        // The review list is unchanged by the rejected duplicate.
        let response = app.oneshot(get_json("/api/reviews")).await.unwrap();
        let body = body_json(response).await;
        assert_eq!(body["data"].as_array().unwrap().len(), 1);
        assert_eq!(body["data"][0]["rating"], 5);
    }

    #[tokio::test]
    async fn create_review_unauthorized_without_token() {
        let (app, app_state) = make_test_app().await;
        let data = setup_test_data(app_state.db()).await;

        let req = Request::builder()
            .method("POST")
            .uri(format!("/api/courses/{}/reviews", data.course.id))
            .header("Content-Type", "application/json")
            .body(Body::from(
                json!({ "rating": 4, "review": "no token" }).to_string(),
            ))
            .unwrap();

        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn average_rating_no_reviews() {
        let (app, app_state) = make_test_app().await;
        let data = setup_test_data(app_state.db()).await;

        let uri = format!("/api/courses/{}/reviews/average", data.course.id);
        let response = app.oneshot(get_json(&uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["average"].as_f64().unwrap(), 0.0);
        assert_eq!(body["data"]["has_data"], false);
        assert_eq!(body["message"], "Average rating is 0, no ratings given yet");
    }

    #[tokio::test]
    async fn average_rating_is_mean_of_ratings() {
        let (app, app_state) = make_test_app().await;
        let data = setup_test_data(app_state.db()).await;
        let db = app_state.db();

        submit_rating(&app, &data, &data.student, 5).await;
        for (i, rating) in [3, 4].into_iter().enumerate() {
            let other = UserModel::create(
                db,
                &format!("extra{i}@example.com"),
                "Extra",
                &format!("Student{i}"),
                "password",
                false,
            )
            .await
            .unwrap();
            course_student::Model::enroll(db, data.course.id, other.id)
                .await
                .unwrap();
            submit_rating(&app, &data, &other, rating).await;
        }

        let uri = format!("/api/courses/{}/reviews/average", data.course.id);
        let response = app.oneshot(get_json(&uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["data"]["average"].as_f64().unwrap(), 4.0);
        assert_eq!(body["data"]["has_data"], true);
    }

    #[tokio::test]
    async fn average_rating_malformed_course_id() {
        let (app, _app_state) = make_test_app().await;

        let response = app
            .oneshot(get_json("/api/courses/not-a-number/reviews/average"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn list_reviews_sorted_by_rating_descending() {
        let (app, app_state) = make_test_app().await;
        let data = setup_test_data(app_state.db()).await;
        let db = app_state.db();

        submit_rating(&app, &data, &data.student, 2).await;
        for (i, rating) in [5, 3].into_iter().enumerate() {
            let other = UserModel::create(
                db,
                &format!("lister{i}@example.com"),
                &format!("Lister{i}"),
                "Surname",
                "password",
                false,
            )
            .await
            .unwrap();
            course_student::Model::enroll(db, data.course.id, other.id)
                .await
                .unwrap();
            submit_rating(&app, &data, &other, rating).await;
        }

        let response = app.oneshot(get_json("/api/reviews")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["message"], "All reviews fetched successfully");

        let reviews = body["data"].as_array().unwrap();
        let ratings: Vec<i64> = reviews
            .iter()
            .map(|r| r["rating"].as_i64().unwrap())
            .collect();
        assert_eq!(ratings, vec![5, 3, 2]);

        assert_eq!(reviews[0]["first_name"], "Lister0");
        assert_eq!(reviews[0]["email"], "lister0@example.com");
        assert_eq!(reviews[0]["course_name"], "Software Engineering");
    }

    #[tokio::test]
    async fn health_check() {
        let (app, _app_state) = make_test_app().await;

        let response = app.oneshot(get_json("/api/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["status"], "ok");
    }
}
