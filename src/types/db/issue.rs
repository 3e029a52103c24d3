use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "issues")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: Category,
    pub status: IssueStatus,
    pub latitude: f64,
    pub longitude: f64,
    pub address: Option<String>,
    pub image_url: Option<String>,
    pub author_id: String,
    pub created_at: i64,
}

/// Issue category. Closed set; values outside it are rejected on write and
/// fail row decoding on read.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum Category {
    #[sea_orm(string_value = "INFRASTRUCTURE")]
    Infrastructure,
    #[sea_orm(string_value = "SAFETY")]
    Safety,
    #[sea_orm(string_value = "ENVIRONMENT")]
    Environment,
    #[sea_orm(string_value = "TRANSPORTATION")]
    Transportation,
    #[sea_orm(string_value = "PUBLIC_SERVICES")]
    PublicServices,
    #[sea_orm(string_value = "COMMUNITY")]
    Community,
    #[sea_orm(string_value = "OTHER")]
    Other,
}

impl Category {
    /// Parse the wire representation. Returns None for anything outside the
    /// closed set, including the "ALL" filter sentinel.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "INFRASTRUCTURE" => Some(Category::Infrastructure),
            "SAFETY" => Some(Category::Safety),
            "ENVIRONMENT" => Some(Category::Environment),
            "TRANSPORTATION" => Some(Category::Transportation),
            "PUBLIC_SERVICES" => Some(Category::PublicServices),
            "COMMUNITY" => Some(Category::Community),
            "OTHER" => Some(Category::Other),
            _ => None,
        }
    }
}

/// Issue lifecycle status. The transition graph is free: any status may move
/// to any other status, including reopening a resolved issue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum IssueStatus {
    #[sea_orm(string_value = "OPEN")]
    Open,
    #[sea_orm(string_value = "IN_PROGRESS")]
    InProgress,
    #[sea_orm(string_value = "RESOLVED")]
    Resolved,
}

impl IssueStatus {
    /// Parse the wire representation. Returns None for anything outside the
    /// closed set.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "OPEN" => Some(IssueStatus::Open),
            "IN_PROGRESS" => Some(IssueStatus::InProgress),
            "RESOLVED" => Some(IssueStatus::Resolved),
            _ => None,
        }
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
