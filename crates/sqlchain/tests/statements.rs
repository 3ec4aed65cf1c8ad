//! End-to-end rendering through the public API.

use sqlchain::prelude::*;
use sqlchain::{ClauseKind, StatementKind};

fn placeholders(stmt: &Statement) -> usize {
    stmt.sql.matches('?').count()
}

#[test]
fn paginated_listing() {
    let stmt = Builder::new("article a")
        .select(fields!["a.id", "a.title", "u.name author"])
        .left_join("user u", "ON u.id = a.user_id")
        .where_eq("a.status", 1)
        .where_op("a.title", "like", "%rust%")
        .order_desc("a.id")
        .page(3, 20)
        .to_sql()
        .unwrap();

    assert_eq!(
        stmt.sql,
        "SELECT `a`.`id`,`a`.`title`,`u`.`name` as `author` FROM `article` as `a` \
         LEFT JOIN `user` as `u` ON u.id = a.user_id \
         WHERE `a`.`status` = ? AND `a`.`title` like ? ORDER BY `a`.`id` DESC LIMIT 40,20"
    );
    assert_eq!(stmt.params, values![1, "%rust%"]);
}

#[test]
fn report_over_derived_table() {
    let stmt = Builder::new("ignored")
        .table_sub(|m| {
            m.table("orders")
                .select(fields!["user_id", raw("sum(total) AS spent")])
                .where_between("created_at", "2024-01-01", "2024-12-31")
                .group("user_id")
        })
        .where_op("spent", ">", 1000)
        .order_desc("spent")
        .limit(10)
        .to_sql()
        .unwrap();

    assert_eq!(
        stmt.sql,
        "SELECT * FROM (SELECT `user_id`,sum(total) AS spent FROM `orders` \
         WHERE `created_at` BETWEEN ? AND ? GROUP BY `user_id`) as `tmp1` \
         WHERE `spent` > ? ORDER BY `spent` DESC LIMIT 10"
    );
    assert_eq!(stmt.params, values!["2024-01-01", "2024-12-31", 1000]);
}

#[test]
fn one_builder_many_statements() {
    let mut users = Builder::new("user");

    let insert = users
        .insert(vec![
            record! { "name" => "alice", "age" => 30 },
            record! { "name" => "bob", "age" => 25 },
        ])
        .unwrap();
    assert_eq!(
        insert.sql,
        "INSERT INTO `user` (`name`,`age`) VALUES(?,?),(?,?)"
    );

    let mut users = users.where_eq("name", "bob");
    let update = users.update(record! { "age" => 26 }).unwrap();
    assert_eq!(update.sql, "UPDATE `user` SET `age`=? WHERE `name` = ?");
    assert_eq!(update.params, values![26, "bob"]);

    let mut users = users.where_op("age", "<", 18).limit(100);
    let delete = users.delete().unwrap();
    assert_eq!(delete.sql, "DELETE FROM `user` WHERE `age` < ? LIMIT 100");

    let select = users.to_sql().unwrap();
    assert_eq!(select.sql, "SELECT * FROM `user`");
}

#[test]
fn upsert_statement() {
    let stmt = Builder::new("counter")
        .duplicate_key(record! { "hits" => 1 })
        .insert(record! { "page" => "/", "hits" => 1 })
        .unwrap();
    assert_eq!(
        stmt.sql,
        "INSERT INTO `counter` (`page`,`hits`) VALUES(?,?) ON DUPLICATE KEY UPDATE hits=?"
    );
    assert_eq!(placeholders(&stmt), stmt.params.len());
}

#[test]
fn archive_with_insert_select() {
    let stmt = Builder::new("user_archive")
        .replace_select(
            "id,name",
            Builder::new("user")
                .select("id,name")
                .where_op("last_login", "<", "2020-01-01"),
        )
        .unwrap();
    assert_eq!(
        stmt.sql,
        "REPLACE INTO `user_archive` (`id`,`name`) SELECT `id`,`name` FROM `user` WHERE `last_login` < ?"
    );
}

#[test]
fn condition_values_compose() {
    let stmt = Builder::new("user")
        .where_cond(Condition::in_list("id", [1, 2, 3]))
        .or_where_group(|g| {
            g.where_not_null("email")
                .where_cond(Condition::op("age", ">=", 18))
        })
        .to_sql()
        .unwrap();
    assert_eq!(
        stmt.sql,
        "SELECT * FROM `user` WHERE `id` IN (?,?,?) OR (`email` IS NOT NULL AND `age` >= ?)"
    );
    assert_eq!(placeholders(&stmt), 4);
}

#[test]
fn params_serialize_for_logging() {
    let stmt = Builder::new("user")
        .where_eq("id", 7)
        .where_eq("name", Option::<&str>::None)
        .to_sql()
        .unwrap();
    let json = serde_json::to_string(&stmt).unwrap();
    assert_eq!(
        json,
        r#"{"sql":"SELECT * FROM `user` WHERE `id` = ? AND `name` = ?","params":[7,null]}"#
    );
}

#[test]
fn builder_state_is_inspectable() {
    let b = Builder::new("user")
        .select("id")
        .join_with(JoinKind::Inner, "team t", "ON t.id = user.team_id AND t.active = ?", [true])
        .group("id")
        .order_raw("RAND()")
        .limit(1);
    assert_eq!(b.table_name(), "user");
    assert_eq!(b.get_table(), "`user`");
    assert_eq!(b.join_fragments().len(), 1);
    assert_eq!(b.params(ClauseKind::Join), [Value::Bool(true)]);
    assert_eq!(b.group_fields(), ["`id`"]);
    assert_eq!(b.order_fragments(), ["RAND()"]);
    assert_eq!(b.limit_fragment(), Some(" LIMIT 1"));
}

#[test]
fn statement_kinds_display_keywords() {
    assert_eq!(StatementKind::Replace.to_string(), "REPLACE");
    assert_eq!(StatementKind::Delete.keyword(), "DELETE");
}

#[test]
fn basic_scenarios() {
    let stmt = Builder::new("user").select(["id", "name"]).to_sql().unwrap();
    assert_eq!(stmt.sql, "SELECT `id`,`name` FROM `user`");
    assert!(stmt.params.is_empty());

    let stmt = Builder::new("user")
        .where_eq("id", 1)
        .or_where_op("name", "like", "%q%")
        .to_sql()
        .unwrap();
    assert_eq!(stmt.sql, "SELECT * FROM `user` WHERE `id` = ? OR `name` like ?");
    assert_eq!(stmt.params, values![1, "%q%"]);

    let stmt = Builder::new("user")
        .where_in("id", [100, 200])
        .to_sql()
        .unwrap();
    assert_eq!(stmt.sql, "SELECT * FROM `user` WHERE `id` IN (?,?)");
    assert_eq!(stmt.params, values![100, 200]);

    let stmt = Builder::new("user")
        .insert(record! { "name" => "A", "age" => 18 })
        .unwrap();
    assert_eq!(stmt.sql, "INSERT INTO `user` (`name`,`age`) VALUES(?,?)");
    assert_eq!(stmt.params, values!["A", 18]);
}

#[test]
fn same_structure_renders_identically() {
    let build = || {
        Builder::new("user")
            .table_sub(|m| m.table_sub(|n| n.table("a").where_eq("x", 1)))
            .join_sub(JoinKind::Left, |j| j.table("b"), "ON tmp3.id = tmp1.id")
    };
    let first = build().to_sql().unwrap();
    let second = build().to_sql().unwrap();
    assert_eq!(first, second);
    assert!(first.sql.contains("as `tmp3`"));
}

#[test]
fn empty_in_list_is_trusted() {
    let stmt = Builder::new("user")
        .where_in("id", Vec::<i64>::new())
        .to_sql()
        .unwrap();
    assert_eq!(stmt.sql, "SELECT * FROM `user` WHERE `id` IN ()");
    assert!(stmt.params.is_empty());
}
