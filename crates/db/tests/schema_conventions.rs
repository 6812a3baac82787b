use sqlx::PgPool;

/// Every `id` column is a bigint.
#[sqlx::test(migrations = "./migrations")]
async fn test_all_pks_are_bigint(pool: PgPool) {
    let rows: Vec<(String, String)> = sqlx::query_as(
        "SELECT table_name, data_type
         FROM information_schema.columns
         WHERE column_name = 'id'
           AND table_schema = 'public'
           AND table_name != '_sqlx_migrations'
         ORDER BY table_name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    assert_eq!(rows.len(), 4);
    for (table, data_type) in &rows {
        assert_eq!(data_type, "bigint", "Table {table}.id should be bigint");
    }
}

/// The constraint names the store maps errors by must exist.
#[sqlx::test(migrations = "./migrations")]
async fn test_named_constraints_exist(pool: PgPool) {
    let names: Vec<(String,)> = sqlx::query_as(
        "SELECT constraint_name::TEXT
         FROM information_schema.table_constraints
         WHERE table_schema = 'public'
           AND constraint_name::TEXT = ANY($1)
         ORDER BY 1",
    )
    .bind(vec![
        newsroom_db::store::FK_COMMENTS_NEWS,
        newsroom_db::store::UQ_NOTES_SLUG,
        newsroom_db::store::UQ_USERS_USERNAME,
    ])
    .fetch_all(&pool)
    .await
    .unwrap();

    let names: Vec<_> = names.into_iter().map(|(n,)| n).collect();
    assert_eq!(names, vec!["fk_comments_news", "uq_notes_slug", "uq_users_username"]);
}

/// News titles are capped at 250 characters by the column type.
#[sqlx::test(migrations = "./migrations")]
async fn test_news_title_is_bounded(pool: PgPool) {
    let ok = sqlx::query("INSERT INTO news (title, text) VALUES ($1, 'x')")
        .bind("я".repeat(250))
        .execute(&pool)
        .await;
    assert!(ok.is_ok(), "250-character title should fit");

    let too_long = sqlx::query("INSERT INTO news (title, text) VALUES ($1, 'x')")
        .bind("я".repeat(251))
        .execute(&pool)
        .await;
    assert!(too_long.is_err(), "251-character title should be rejected");
}

/// Deleting a news item removes its comments.
#[sqlx::test(migrations = "./migrations")]
async fn test_news_delete_cascades_to_comments(pool: PgPool) {
    let (user_id,): (i64,) =
        sqlx::query_as("INSERT INTO users (username, password_hash) VALUES ('u', 'h') RETURNING id")
            .fetch_one(&pool)
            .await
            .unwrap();
    let (news_id,): (i64,) =
        sqlx::query_as("INSERT INTO news (title, text) VALUES ('t', 'x') RETURNING id")
            .fetch_one(&pool)
            .await
            .unwrap();
    sqlx::query("INSERT INTO comments (news_id, author_id, text) VALUES ($1, $2, 'c')")
        .bind(news_id)
        .bind(user_id)
        .execute(&pool)
        .await
        .unwrap();

    sqlx::query("DELETE FROM news WHERE id = $1")
        .bind(news_id)
        .execute(&pool)
        .await
        .unwrap();

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM comments")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}
