use sqlx::SqliteConnection;

pub struct NewUser<'a> {
    pub name: &'a str,
    pub avatar: &'a str,
    pub phone: Option<&'a str>,
}

const SQL_INSERT_USER: &str = r#"
INSERT INTO users (
  name,
  avatar,
  phone
) VALUES (?1, ?2, ?3)
RETURNING id
"#;

pub async fn insert_user(conn: &mut SqliteConnection, user: NewUser<'_>) -> sqlx::Result<i64> {
    sqlx::query_scalar::<_, i64>(SQL_INSERT_USER)
        .bind(user.name)
        .bind(user.avatar)
        .bind(user.phone)
        .fetch_one(conn)
        .await
}
