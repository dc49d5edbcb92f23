use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    FromQueryResult, JoinType, PaginatorTrait, QueryOrder, QuerySelect, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{ReviewError, with_store_timeout};
use crate::models::course_student;

pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;

/// A single rating+text record authored by one user for one course.
///
/// Immutable once created; there is no update or delete path. The
/// `uq_reviews_user_course` index enforces at most one review per
/// (user, course) pair.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "reviews")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub course_id: i64,
    pub user_id: i64,

    pub rating: i32,
    pub review: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::course::Entity",
        from = "Column::CourseId",
        to = "super::course::Column::Id",
        on_delete = "Cascade"
    )]
    Course,

    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// A course's mean rating, tagged with whether any reviews existed.
///
/// Keeps "no data yet" distinguishable from a genuine zero mean.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct RatingSummary {
    pub average: f64,
    pub has_data: bool,
}

/// A review enriched with denormalized display fields from its author and
/// course, as returned by the listing endpoint.
#[derive(Debug, Clone, PartialEq, FromQueryResult, Serialize)]
pub struct ReviewView {
    pub id: i64,
    pub rating: i32,
    pub review: String,
    pub created_at: DateTime<Utc>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub image: Option<String>,
    pub course_name: String,
}

impl Model {
    /// Records a review for a course on behalf of an enrolled student.
    ///
    /// Enforces, in order:
    /// 1. `rating` within 1..=5, non-empty review text, positive course id.
    /// 2. The caller is in the course's enrolled-student set (a missing
    ///    course and a non-enrolled caller are deliberately the same error).
    /// 3. No prior review by this caller for this course. The pre-check is
    ///    advisory; the unique index settles concurrent submissions, and an
    ///    insert conflict comes back as [`ReviewError::Duplicate`].
    ///
    /// The insert runs in a transaction and the course's post-insert review
    /// count is logged for audit.
    pub async fn submit(
        db: &DbConn,
        user_id: i64,
        course_id: i64,
        rating: i32,
        review_text: &str,
    ) -> Result<Model, ReviewError> {
        if !(MIN_RATING..=MAX_RATING).contains(&rating) {
            return Err(ReviewError::Validation(format!(
                "Rating must be between {MIN_RATING} and {MAX_RATING}"
            )));
        }
        if review_text.trim().is_empty() {
            return Err(ReviewError::Validation("Review text must not be empty".into()));
        }
        if course_id <= 0 {
            return Err(ReviewError::Validation("Invalid course id".into()));
        }

        let enrolled =
            with_store_timeout(course_student::Model::is_enrolled(db, course_id, user_id)).await?;
        if !enrolled {
            return Err(ReviewError::NotEnrolled);
        }

        let existing = with_store_timeout(
            Entity::find()
                .filter(Column::UserId.eq(user_id))
                .filter(Column::CourseId.eq(course_id))
                .one(db),
        )
        .await?;
        if existing.is_some() {
            return Err(ReviewError::Duplicate);
        }

        let txn = with_store_timeout(db.begin()).await?;

        let now = Utc::now();
        let review = ActiveModel {
            course_id: Set(course_id),
            user_id: Set(user_id),
            rating: Set(rating),
            review: Set(review_text.to_owned()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let created = match with_store_timeout(review.insert(&txn)).await {
            Ok(model) => model,
            Err(ReviewError::Db(err)) => return Err(ReviewError::from_insert_err(err)),
            Err(err) => return Err(err),
        };

        let linked = with_store_timeout(
            Entity::find()
                .filter(Column::CourseId.eq(course_id))
                .count(&txn),
        )
        .await?;

        with_store_timeout(txn.commit()).await?;

        info!(
            review_id = created.id,
            course_id,
            user_id,
            course_reviews = linked,
            "Review recorded"
        );

        Ok(created)
    }

    /// Mean of all ratings for `course_id`, computed in the store.
    pub async fn average_for_course(
        db: &DbConn,
        course_id: i64,
    ) -> Result<RatingSummary, ReviewError> {
        if course_id <= 0 {
            return Err(ReviewError::Validation("Invalid course id".into()));
        }

        let average: Option<Option<f64>> = with_store_timeout(
            Entity::find()
                .filter(Column::CourseId.eq(course_id))
                .select_only()
                .expr_as(Func::avg(Expr::col(Column::Rating)), "average")
                .into_tuple()
                .one(db),
        )
        .await?;

        // AVG over an empty subset yields a single NULL row.
        Ok(match average.flatten() {
            Some(average) => RatingSummary {
                average,
                has_data: true,
            },
            None => RatingSummary {
                average: 0.0,
                has_data: false,
            },
        })
    }

    /// Every review, rating-descending, enriched with author and course
    /// display fields.
    ///
    /// Ties are broken by ascending id so repeated calls return the same
    /// order. Review rows cascade away with their user or course, so the
    /// inner joins cannot drop rows.
    pub async fn list_all(db: &DbConn) -> Result<Vec<ReviewView>, ReviewError> {
        with_store_timeout(
            Entity::find()
                .join(JoinType::InnerJoin, Relation::User.def())
                .join(JoinType::InnerJoin, Relation::Course.def())
                .select_only()
                .column(Column::Id)
                .column(Column::Rating)
                .column(Column::Review)
                .column(Column::CreatedAt)
                .column_as(super::user::Column::FirstName, "first_name")
                .column_as(super::user::Column::LastName, "last_name")
                .column_as(super::user::Column::Email, "email")
                .column_as(super::user::Column::Image, "image")
                .column_as(super::course::Column::CourseName, "course_name")
                .order_by_desc(Column::Rating)
                .order_by_asc(Column::Id)
                .into_model::<ReviewView>()
                .all(db),
        )
        .await
    }
}
