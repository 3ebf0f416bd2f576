use sea_orm::entity::prelude::*;

/// Practice account: client, lawyer or admin.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub auth_subject: String,
    #[sea_orm(unique)]
    pub email: String,
    pub full_name: String,
    pub account_type: String,
    pub phone_number: Option<String>,
    pub profile_picture: String,
    pub is_active: bool,
    pub last_login: chrono::DateTime<chrono::Utc>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
