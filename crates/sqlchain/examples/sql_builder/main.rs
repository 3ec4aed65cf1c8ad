//! Example: building a filtered user listing and a few writes.
//!
//! Run with:
//!   RUST_LOG=sqlchain.sql=debug cargo run --example sql_builder -p sqlchain

use sqlchain::prelude::*;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
struct Filters {
    status: Option<i64>,
    search: Option<String>,
    roles_any_of: Vec<String>,
    include_deleted: bool,
    page: i64,
    per_page: i64,
    sort_by: Option<String>,
}

fn list_users(filters: &Filters) -> SqlResult<Statement> {
    let mut q = Builder::new("users u").select("u.id, u.name, u.status, u.role, u.created_at");

    if let Some(status) = filters.status {
        q = q.where_eq("u.status", status);
    }

    if let Some(search) = &filters.search {
        let pattern = format!("%{search}%");
        q = q.where_group(|g| {
            g.where_op("u.name", "like", pattern.as_str())
                .or_where_op("u.email", "like", pattern.as_str())
        });
    }

    if !filters.roles_any_of.is_empty() {
        q = q.where_in("u.role", filters.roles_any_of.iter().map(String::as_str));
    }

    if !filters.include_deleted {
        q = q.where_null("u.deleted_at");
    }

    q = q.order_desc("u.created_at");
    if let Some(sort_by) = &filters.sort_by {
        q = q.order_asc(sort_by);
    }

    q.page(filters.page, filters.per_page).to_sql()
}

fn print(title: &str, stmt: &Statement) {
    println!("{title}:\n  {}\n  params = {:?}\n", stmt.sql, stmt.params);
}

fn main() -> SqlResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let filters = Filters {
        status: Some(1),
        search: Some("a".to_string()),
        roles_any_of: vec!["admin".to_string(), "owner".to_string()],
        include_deleted: false,
        page: 1,
        per_page: 10,
        sort_by: Some("u.id".to_string()),
    };
    print("list users", &list_users(&filters)?);

    // Users with more than one active session, via a derived table.
    let stmt = Builder::new("users")
        .alias("u")
        .select("u.id, u.name, tmp1.sessions")
        .join_sub(
            JoinKind::Inner,
            |s| {
                s.table("sessions")
                    .select(fields!["user_id", raw("count(*) AS sessions")])
                    .where_op("expires_at", ">", "2024-06-01 00:00:00")
                    .group("user_id")
                    .having_op("sessions", ">", 1)
            },
            "ON tmp1.user_id = u.id",
        )
        .to_sql()?;
    print("busy users", &stmt);

    let mut users = Builder::new("users");

    let stmt = users
        .clone()
        .duplicate_key(record! { "name" => "alice" })
        .insert(vec![
            record! { "email" => "alice@example.com", "name" => "alice" },
            record! { "email" => "bob@example.com", "name" => "bob" },
        ])?;
    print("upsert", &stmt);

    let stmt = users
        .clone()
        .where_eq("email", "bob@example.com")
        .update(record! { "status" => 0 })?;
    print("disable", &stmt);

    let stmt = users.delete()?;
    print("delete everything", &stmt);

    Ok(())
}
