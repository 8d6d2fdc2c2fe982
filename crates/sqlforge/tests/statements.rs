//! End-to-end statement scenarios exercising the full builder surface.

use sqlforge::{
    ColumnSet, CompareOp, DbCommand, DbParameter, DbType, JoinKind, ParamExpr, Row, SelectBuilder,
    SqlValue, Statement, Table, delete_from, insert_into, select_from, update,
};

/// Minimal driver command stand-in.
#[derive(Debug, Default)]
struct RecordingCommand {
    text: String,
    parameters: Vec<DbParameter>,
}

impl DbCommand for RecordingCommand {
    fn set_text(&mut self, sql: &str) {
        self.text = sql.to_string();
    }

    fn push_parameter(&mut self, parameter: DbParameter) {
        self.parameters.push(parameter);
    }
}

#[test]
fn select_with_seven_chained_joins_and_mixed_on_forms() {
    let mut qb = SelectBuilder::new();
    qb.from(Table::aliased("dbo.root", "r"));
    qb.select_cols(&["id", "name"]).unwrap();

    // plain string ON clauses
    qb.inner_join(Table::aliased("dbo.t1", "t1"), "r.id = t1.rid");
    qb.inner_join(Table::aliased("dbo.t2", "t2"), "t1.id = t2.t1id");
    // parameterized string ON clauses
    qb.inner_join(
        Table::aliased("dbo.t3", "t3"),
        "t2.id = t3.t2id AND t3.kind = @param1",
    );
    qb.inner_join(
        Table::aliased("dbo.t4", "t4"),
        "t3.id = t4.t3id AND t4.state = @param2",
    );
    // expression-comparison ON clauses, chained left to right
    qb.join_cols(JoinKind::Inner, Table::aliased("dbo.t5", "t5"), "t4.id", "t4id")
        .unwrap();
    qb.join_cols(JoinKind::Inner, Table::aliased("dbo.t6", "t6"), "t5.id", "t6.t5id")
        .unwrap();
    qb.inner_join(Table::aliased("dbo.t7", "t7"), "t6.id = t7.t6id");

    assert_eq!(
        qb.sql_string().unwrap(),
        "SELECT r.id, r.name FROM dbo.root r \
         INNER JOIN dbo.t1 t1 ON (r.id = t1.rid) \
         INNER JOIN dbo.t2 t2 ON (t1.id = t2.t1id) \
         INNER JOIN dbo.t3 t3 ON (t2.id = t3.t2id AND t3.kind = @param1) \
         INNER JOIN dbo.t4 t4 ON (t3.id = t4.t3id AND t4.state = @param2) \
         INNER JOIN dbo.t5 t5 ON (t4.id = t5.t4id) \
         INNER JOIN dbo.t6 t6 ON (t5.id = t6.t5id) \
         INNER JOIN dbo.t7 t7 ON (t6.id = t7.t6id)"
    );

    let names: Vec<String> = qb.parameters().into_iter().map(|p| p.name).collect();
    assert_eq!(names, vec!["@param1", "@param2"]);
}

#[test]
fn fill_command_requires_bound_parameters() {
    let mut qb = select_from(("dbo.users", "u"));
    qb.where_raw("u.status = @status AND u.age > @min_age");

    let mut cmd = RecordingCommand::default();
    let err = qb.fill_command(&mut cmd).unwrap_err();
    assert!(err.is_unbound_parameter());

    qb.bind("status", "active").unwrap();
    qb.bind_typed("min_age", DbType::Int, 18i32).unwrap();
    qb.fill_command(&mut cmd).unwrap();

    assert_eq!(
        cmd.text,
        "SELECT * FROM dbo.users u WHERE (u.status = @status AND u.age > @min_age)"
    );
    assert_eq!(cmd.parameters.len(), 2);
    assert_eq!(cmd.parameters[0].name, "@status");
    assert_eq!(cmd.parameters[0].value, SqlValue::Str("active".to_string()));
    assert_eq!(cmd.parameters[1].ty, Some(DbType::Int));
}

#[test]
fn rendering_is_repeatable_and_side_effect_free() {
    let mut qb = select_from(("dbo.events", "e"));
    qb.select("kind").unwrap();
    qb.where_value_op("kind", CompareOp::Like, "user.%").unwrap();
    qb.group_by(&["e.kind"]);
    qb.order_by_desc("kind").unwrap();

    let first = qb.sql_string().unwrap();
    let second = qb.sql_string().unwrap();
    assert_eq!(first, second);
    assert_eq!(
        first,
        "SELECT e.kind FROM dbo.events e WHERE (e.kind LIKE @e_kind) \
         GROUP BY e.kind ORDER BY e.kind DESC"
    );
    assert_eq!(qb.parameters().len(), 1);
    assert_eq!(qb.parameters().len(), 1);
}

#[test]
fn insert_batch_fills_command_row_major() {
    let columns = ColumnSet::new()
        .column_sized("name", DbType::Text, 64)
        .column("age", DbType::Int);
    let mut ib = insert_into("dbo.users", columns);
    ib.add_row(Row::new().set("name", "alice").set("age", 30i32))
        .unwrap();
    ib.add_row(Row::new().set("name", "bob").set("age", Option::<i32>::None))
        .unwrap();

    let mut cmd = RecordingCommand::default();
    ib.fill_command(&mut cmd).unwrap();

    assert_eq!(
        cmd.text,
        "INSERT INTO dbo.users (name, age) VALUES (@name_0, @age_0), (@name_1, @age_1)"
    );
    let names: Vec<&str> = cmd.parameters.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["@name_0", "@age_0", "@name_1", "@age_1"]);
    assert_eq!(cmd.parameters[0].size, Some(64));
    assert_eq!(cmd.parameters[3].value, SqlValue::Null);
}

#[test]
fn update_and_delete_share_condition_machinery() {
    let columns = ColumnSet::new().column("Content", DbType::Text);
    let mut ub = update("dbo.Test", columns, Row::new().set("Content", "foo"));
    ub.where_raw_with("dbo.Test.Id = @id", vec![ParamExpr::with_value("id", 5i64)]);

    let mut cmd = RecordingCommand::default();
    ub.fill_command(&mut cmd).unwrap();
    assert_eq!(
        cmd.text,
        "UPDATE dbo.Test SET dbo.Test.Content = @dboTest_Content WHERE (dbo.Test.Id = @id)"
    );
    assert_eq!(cmd.parameters.len(), 2);

    let mut db = delete_from("dbo.Test");
    db.where_raw_with("Id = @id", vec![ParamExpr::with_value("id", 5i64)]);
    let mut cmd = RecordingCommand::default();
    db.fill_command(&mut cmd).unwrap();
    assert_eq!(cmd.text, "DELETE FROM dbo.Test WHERE (Id = @id)");
    assert_eq!(cmd.parameters.len(), 1);
}

#[test]
fn multiple_from_tables_with_trailing_column_selection() {
    let mut qb = SelectBuilder::new();
    qb.from(Table::aliased("dbo.a", "a"));
    qb.from(Table::aliased("dbo.b", "b"));
    qb.from_cols(Table::aliased("dbo.c", "c"), &["x", "y"]);

    assert_eq!(
        qb.sql_string().unwrap(),
        "SELECT c.x, c.y FROM dbo.a a, dbo.b b, dbo.c c"
    );
}
