use sea_orm::entity::prelude::*;

/// Legal matter linking one client and one lawyer.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "cases")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub client_id: Uuid,
    pub lawyer_id: Uuid,
    pub case_type: String,
    pub status: String,
    pub priority: String,
    pub start_date: Date,
    pub end_date: Option<Date>,
    pub estimated_completion: Option<Date>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::case_documents::Entity")]
    CaseDocuments,
    #[sea_orm(has_many = "super::case_notes::Entity")]
    CaseNotes,
    #[sea_orm(has_many = "super::appointments::Entity")]
    Appointments,
}

impl Related<super::case_documents::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CaseDocuments.def()
    }
}

impl Related<super::case_notes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CaseNotes.def()
    }
}

impl Related<super::appointments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Appointments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
