use sea_orm_migration::prelude::*;

use super::m20250612_000001_create_user_tables::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create issues table
        manager
            .create_table(
                Table::create()
                    .table(Issues::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Issues::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Issues::Title).string().not_null())
                    .col(ColumnDef::new(Issues::Description).string().not_null())
                    .col(ColumnDef::new(Issues::Category).string().not_null())
                    .col(ColumnDef::new(Issues::Status).string().not_null().default("OPEN"))
                    .col(ColumnDef::new(Issues::Latitude).double().not_null())
                    .col(ColumnDef::new(Issues::Longitude).double().not_null())
                    .col(ColumnDef::new(Issues::Address).string())
                    .col(ColumnDef::new(Issues::ImageUrl).string())
                    .col(ColumnDef::new(Issues::AuthorId).string().not_null())
                    .col(ColumnDef::new(Issues::CreatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_issues_author_id")
                            .from(Issues::Table, Issues::AuthorId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                    )
                    .to_owned(),
            )
            .await?;

        // Indexes covering the feed query (ordering + filters)
        manager
            .create_index(
                Index::create()
                    .name("idx_issues_created_at")
                    .table(Issues::Table)
                    .col(Issues::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_issues_category")
                    .table(Issues::Table)
                    .col(Issues::Category)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_issues_status")
                    .table(Issues::Table)
                    .col(Issues::Status)
                    .to_owned(),
            )
            .await?;

        // Create votes table
        manager
            .create_table(
                Table::create()
                    .table(Votes::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Votes::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Votes::UserId).string().not_null())
                    .col(ColumnDef::new(Votes::IssueId).string().not_null())
                    .col(ColumnDef::new(Votes::CreatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_votes_user_id")
                            .from(Votes::Table, Votes::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_votes_issue_id")
                            .from(Votes::Table, Votes::IssueId)
                            .to(Issues::Table, Issues::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                    )
                    .to_owned(),
            )
            .await?;

        // One vote per (user, issue). The toggle operation relies on this
        // constraint to reject a duplicate concurrent insert.
        manager
            .create_index(
                Index::create()
                    .name("idx_votes_user_id_issue_id")
                    .table(Votes::Table)
                    .col(Votes::UserId)
                    .col(Votes::IssueId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_votes_issue_id")
                    .table(Votes::Table)
                    .col(Votes::IssueId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Votes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Issues::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Issues {
    Table,
    Id,
    Title,
    Description,
    Category,
    Status,
    Latitude,
    Longitude,
    Address,
    ImageUrl,
    AuthorId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Votes {
    Table,
    Id,
    UserId,
    IssueId,
    CreatedAt,
}
