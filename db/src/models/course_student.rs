use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Membership of a user in a course's enrolled-student set.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "course_students")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub course_id: i64,

    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: i64,
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

impl Model {
    pub async fn enroll(db: &DbConn, course_id: i64, user_id: i64) -> Result<Model, DbErr> {
        let membership = ActiveModel {
            course_id: Set(course_id),
            user_id: Set(user_id),
        };

        membership.insert(db).await
    }

    /// Whether `user_id` is in the enrolled-student set of `course_id`.
    ///
    /// Enrollment rows are foreign-keyed to `courses`, so a hit also proves
    /// the course exists.
    pub async fn is_enrolled(db: &DbConn, course_id: i64, user_id: i64) -> Result<bool, DbErr> {
        let found = Entity::find_by_id((course_id, user_id)).one(db).await?;
        Ok(found.is_some())
    }
}
