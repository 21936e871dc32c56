use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::{ColumnDef, ForeignKeyAction, Index, Table};

#[derive(DeriveMigrationName)]
pub struct Migration;

// ----- Iden enums for tables & columns -----

// Forum mirror tables: the game only reads them to find placement targets.
#[derive(Iden)]
enum Users {
    Table,
    Id,
    Username,
    LastSeenAt,
}

#[derive(Iden)]
enum Discussions {
    Table,
    Id,
    Title,
    IsPrivate,
    HiddenAt,
    CreatedAt,
}

#[derive(Iden)]
enum Posts {
    Table,
    Id,
    DiscussionId,
    CreatedAt,
    HiddenAt,
}

#[derive(Iden)]
enum Rounds {
    Table,
    Id,
    Name,
    StartsAt,
    EndsAt,
    CreatedAt,
}

#[derive(Iden)]
enum Fishes {
    Table,
    Id,
    RoundId,
    Name,
    DiscussionIdPlacement,
    PostIdPlacement,
    UserIdPlacement,
    PlacementValidSince,
    LastCaughtAt,
    UserIdLastPlacement,
    UserIdLastNaming,
    UserIdLastCatch,
    CreatedAt,
    UpdatedAt,
    Version,
}

#[derive(Iden)]
enum Rankings {
    Table,
    Id,
    RoundId,
    UserId,
    CatchCount,
    CreatedAt,
    UpdatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // users
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Users::Username).string().not_null())
                    .col(
                        ColumnDef::new(Users::LastSeenAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        // discussions
        manager
            .create_table(
                Table::create()
                    .table(Discussions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Discussions::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Discussions::Title).text().not_null())
                    .col(
                        ColumnDef::new(Discussions::IsPrivate)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Discussions::HiddenAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Discussions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // posts
        manager
            .create_table(
                Table::create()
                    .table(Posts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Posts::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Posts::DiscussionId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Posts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Posts::HiddenAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_posts_discussion_id")
                            .from(Posts::Table, Posts::DiscussionId)
                            .to(Discussions::Table, Discussions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_posts_created_at")
                    .table(Posts::Table)
                    .col(Posts::CreatedAt)
                    .to_owned(),
            )
            .await?;

        // rounds
        manager
            .create_table(
                Table::create()
                    .table(Rounds::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Rounds::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Rounds::Name).string().not_null())
                    .col(
                        ColumnDef::new(Rounds::StartsAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Rounds::EndsAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Rounds::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // fishes
        manager
            .create_table(
                Table::create()
                    .table(Fishes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Fishes::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Fishes::RoundId).big_integer().not_null())
                    .col(ColumnDef::new(Fishes::Name).string_len(255).null())
                    .col(
                        ColumnDef::new(Fishes::DiscussionIdPlacement)
                            .big_integer()
                            .null(),
                    )
                    .col(ColumnDef::new(Fishes::PostIdPlacement).big_integer().null())
                    .col(ColumnDef::new(Fishes::UserIdPlacement).big_integer().null())
                    .col(
                        ColumnDef::new(Fishes::PlacementValidSince)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Fishes::LastCaughtAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    // Attribution only; no foreign keys on the user_id_last_* columns.
                    .col(
                        ColumnDef::new(Fishes::UserIdLastPlacement)
                            .big_integer()
                            .null(),
                    )
                    .col(ColumnDef::new(Fishes::UserIdLastNaming).big_integer().null())
                    .col(ColumnDef::new(Fishes::UserIdLastCatch).big_integer().null())
                    .col(
                        ColumnDef::new(Fishes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Fishes::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Fishes::Version)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_fishes_round_id")
                            .from(Fishes::Table, Fishes::RoundId)
                            .to(Rounds::Table, Rounds::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_fishes_round_id")
                    .table(Fishes::Table)
                    .col(Fishes::RoundId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_fishes_discussion_placement")
                    .table(Fishes::Table)
                    .col(Fishes::DiscussionIdPlacement)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_fishes_post_placement")
                    .table(Fishes::Table)
                    .col(Fishes::PostIdPlacement)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_fishes_user_placement")
                    .table(Fishes::Table)
                    .col(Fishes::UserIdPlacement)
                    .to_owned(),
            )
            .await?;

        // rankings
        manager
            .create_table(
                Table::create()
                    .table(Rankings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Rankings::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Rankings::RoundId).big_integer().not_null())
                    .col(ColumnDef::new(Rankings::UserId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Rankings::CatchCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Rankings::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Rankings::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_rankings_round_id")
                            .from(Rankings::Table, Rankings::RoundId)
                            .to(Rounds::Table, Rounds::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One ranking row per (round, user); the catch upsert conflicts on this index.
        manager
            .create_index(
                Index::create()
                    .name("ux_rankings_round_user")
                    .table(Rankings::Table)
                    .col(Rankings::RoundId)
                    .col(Rankings::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("ux_rankings_round_user")
                    .table(Rankings::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Rankings::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Fishes::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Rounds::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Posts::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Discussions::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;

        Ok(())
    }
}
