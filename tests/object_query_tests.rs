//! 对象查询引擎集成测试
//!
//! 使用记录调用的模拟遍历源验证执行管道的全部契约：
//! 片段链顺序、禁用步骤检查、终端方法语义、状态重置和错误传播

mod common;

use std::collections::HashMap;
use std::sync::Arc;

use common::{person_vertex, MockSource, Person};
use graph_objects::core::{DBError, QueryError, RawValue, Value};
use graph_objects::query::ObjectQuery;
use graph_objects::traversal::library::{Drop, HasLabel, Select};
use graph_objects::traversal::{Source, StepType, SubTraversal, Traversal};

fn setup() -> (Arc<MockSource>, ObjectQuery<MockSource>) {
    let g = Arc::new(MockSource::new());
    let query = ObjectQuery::new(g.clone());
    (g, query)
}

#[test]
fn test_fragment_chain_applies_left_to_right() {
    let (g, mut query) = setup();
    g.push_result(vec![person_vertex(1, "Alice", 30), person_vertex(2, "Bob", 25)]);

    let fragments: Vec<Box<dyn SubTraversal>> = vec![
        Box::new(HasLabel::of("person")),
        Box::new(|t: Traversal| t.as_("a")),
        Box::new(Select::of(&["a"])),
    ];
    query.by(fragments);
    let people: Vec<Person> = query.list().expect("Two vertices should convert");

    assert_eq!(
        g.executed(),
        vec!["V().hasLabel('person').as('a').select('a')".to_string()]
    );
    assert_eq!(
        people,
        vec![
            Person {
                name: "Alice".to_string(),
                age: 30
            },
            Person {
                name: "Bob".to_string(),
                age: 25
            },
        ]
    );
}

#[test]
fn test_list_preserves_duplicates() {
    let (g, mut query) = setup();
    g.push_result(vec![person_vertex(1, "Alice", 30), person_vertex(1, "Alice", 30)]);

    query.by_one(HasLabel::of("person"));
    let people: Vec<Person> = query.list().expect("Bulk results should convert");

    // bulk/multiset 语义：重复条目不去重
    assert_eq!(people.len(), 2);
    assert_eq!(people[0], people[1]);
}

#[test]
fn test_one_rejects_zero_rows() {
    let (_g, mut query) = setup();
    query.by_one(HasLabel::of("person"));
    let err = query.one::<Person>().expect_err("Zero rows");
    assert!(matches!(
        err,
        DBError::Query(QueryError::UnexpectedResultCount {
            expected: 1,
            actual: 0
        })
    ));
}

#[test]
fn test_one_rejects_multiple_rows() {
    let (g, mut query) = setup();
    g.push_result(vec![person_vertex(1, "Alice", 30), person_vertex(2, "Bob", 25)]);

    query.by_one(HasLabel::of("person"));
    let err = query.one::<Person>().expect_err("Two rows");
    assert!(matches!(
        err,
        DBError::Query(QueryError::UnexpectedResultCount {
            expected: 1,
            actual: 2
        })
    ));
}

#[test]
fn test_one_returns_single_row() {
    let (g, mut query) = setup();
    g.push_result(vec![person_vertex(1, "Alice", 30)]);

    query.by_one(HasLabel::of("person"));
    let person: Person = query.one().expect("Exactly one row");
    assert_eq!(person.name, "Alice");
}

#[test]
fn test_optional_never_errors() {
    let (g, mut query) = setup();

    // 空结果
    query.by_one(HasLabel::of("person"));
    assert_eq!(query.optional::<Person>(), None);

    // 引擎失败
    g.push_error("connection lost");
    query.by_one(HasLabel::of("person"));
    assert_eq!(query.optional::<Person>(), None);

    // 转换失败
    g.push_result(vec![RawValue::Scalar(Value::Int(1))]);
    query.by_one(HasLabel::of("person"));
    assert_eq!(query.optional::<Person>(), None);

    // 恰好一行
    g.push_result(vec![person_vertex(1, "Alice", 30)]);
    query.by_one(HasLabel::of("person"));
    let person = query.optional::<Person>().expect("One row present");
    assert_eq!(person.age, 30);
}

#[test]
fn test_disabled_step_rejected_before_execution() {
    let (g, mut query) = setup();
    query.disable(&[StepType::Drop]);
    query.by_one(Drop);

    let err = query.none().expect_err("drop is disabled");
    match err {
        DBError::Query(QueryError::DisabledStepQueried(step)) => assert_eq!(step, "drop"),
        other => panic!("Unexpected error: {other}"),
    }
    // 拒绝发生在任何引擎调用之前
    assert_eq!(g.execute_count(), 0);
}

#[test]
fn test_disabled_step_match_is_case_insensitive() {
    let (g, mut query) = setup();
    query.disable(&[StepType::AddV]);
    query.by_traversal(|_g: &MockSource| Traversal::v().step("ADDV", vec!["'x'".to_string()]));

    let err = query.none().expect_err("addV is disabled regardless of case");
    assert!(matches!(
        err,
        DBError::Query(QueryError::DisabledStepQueried(_))
    ));
    assert_eq!(g.execute_count(), 0);
}

#[test]
fn test_undisabled_traversal_executes() {
    let (g, mut query) = setup();
    query.disable(&[StepType::Drop]);
    query.by_one(HasLabel::of("person"));
    query.none().expect("hasLabel is not disabled");
    assert_eq!(g.execute_count(), 1);
}

#[test]
fn test_state_reset_after_success() {
    let (_g, mut query) = setup();
    query.by_one(HasLabel::of("person"));
    query.none().expect("First call succeeds");

    // 未重新配置的后续调用必须报未指定遍历
    let err = query.none().expect_err("State was reset");
    assert!(matches!(
        err,
        DBError::Query(QueryError::NoTraversalSpecified)
    ));
}

#[test]
fn test_state_reset_after_failure() {
    let (g, mut query) = setup();
    g.push_error("engine exploded");
    query.by_one(HasLabel::of("person"));
    query.none().expect_err("Engine failure propagates");

    let err = query.none().expect_err("State was reset on the failure path too");
    assert!(matches!(
        err,
        DBError::Query(QueryError::NoTraversalSpecified)
    ));
}

#[test]
fn test_source_override_lasts_one_execution() {
    let (g, mut query) = setup();
    query.source(Source::E).by_one(|t: Traversal| t.count());
    query.none().expect("Edge traversal");

    query.by_one(|t: Traversal| t.count());
    query.none().expect("Back to default source");

    assert_eq!(
        g.executed(),
        vec!["E().count()".to_string(), "V().count()".to_string()]
    );
}

#[test]
fn test_full_traversal_overrides_fragment_chain() {
    let (g, mut query) = setup();
    query.by_one(HasLabel::of("person"));
    query.by_traversal(|_g: &MockSource| Traversal::e().has_label("knows"));
    query.none().expect("Full traversal executes");

    assert_eq!(g.executed(), vec!["E().hasLabel('knows')".to_string()]);
}

#[test]
fn test_select_converts_rows_by_declared_alias_type() {
    let (g, mut query) = setup();
    let mut first = HashMap::new();
    first.insert("a".to_string(), person_vertex(1, "Alice", 30));
    first.insert("n".to_string(), RawValue::Scalar(Value::Int(7)));
    let mut second = HashMap::new();
    second.insert("a".to_string(), person_vertex(2, "Bob", 25));
    second.insert("n".to_string(), RawValue::Scalar(Value::Int(8)));
    g.push_result(vec![RawValue::Map(first), RawValue::Map(second)]);

    query.alias::<Person>("a").alias::<i64>("n");
    query.by(vec![
        Box::new(HasLabel::of("person")),
        Box::new(Select::of(&["a", "n"])),
    ]);
    let selections = query.select().expect("Rows should convert");

    // 行顺序与引擎返回顺序一致
    assert_eq!(selections.len(), 2);
    let alice = selections.rows()[0]
        .get::<Person>("a")
        .expect("Alias a is a Person");
    assert_eq!(alice.name, "Alice");
    let bob = selections.rows()[1]
        .get::<Person>("a")
        .expect("Alias a is a Person");
    assert_eq!(bob.name, "Bob");
    assert_eq!(selections.rows()[0].get::<i64>("n"), Some(&7));
    assert_eq!(selections.rows()[1].get::<i64>("n"), Some(&8));
}

#[test]
fn test_select_undeclared_alias_passes_through() {
    let (g, mut query) = setup();
    let mut row = HashMap::new();
    let raw = RawValue::Scalar(Value::String("opaque".to_string()));
    row.insert("x".to_string(), raw.clone());
    g.push_result(vec![RawValue::Map(row)]);

    query.by_one(Select::of(&["x"]));
    let selections = query.select().expect("Pass-through row");

    assert_eq!(selections.rows()[0].get::<RawValue>("x"), Some(&raw));
}

#[test]
fn test_select_uses_latest_alias_binding() {
    let (g, mut query) = setup();
    let mut row = HashMap::new();
    row.insert(
        "n".to_string(),
        RawValue::Scalar(Value::String("seven".to_string())),
    );
    g.push_result(vec![RawValue::Map(row)]);

    // 重复声明：最后一次生效
    query.alias::<i64>("n").alias::<String>("n");
    query.by_one(Select::of(&["n"]));
    let selections = query.select().expect("String binding parses");

    assert_eq!(
        selections.rows()[0].get::<String>("n"),
        Some(&"seven".to_string())
    );
}

#[test]
fn test_conversion_failure_propagates_and_resets() {
    let (g, mut query) = setup();
    g.push_result(vec![RawValue::Scalar(Value::Int(1))]);

    query.by_one(HasLabel::of("person"));
    let err = query.list::<Person>().expect_err("Scalar cannot become Person");
    assert!(matches!(err, DBError::Query(QueryError::Conversion(_))));

    let err = query.none().expect_err("State reset after conversion failure");
    assert!(matches!(
        err,
        DBError::Query(QueryError::NoTraversalSpecified)
    ));
}

#[test]
fn test_engine_failure_propagates() {
    let (g, mut query) = setup();
    g.push_error("timeout talking to engine");

    query.by_one(HasLabel::of("person"));
    let err = query.list::<Person>().expect_err("Engine failure");
    match err {
        DBError::Query(QueryError::ExecutionError(message)) => {
            assert!(message.contains("timeout"))
        }
        other => panic!("Unexpected error: {other}"),
    }
}

#[test]
fn test_close_is_repeatable_and_propagates_errors() {
    let (g, query) = setup();
    query.close().expect("First close");
    query.close().expect("Close is safe to repeat");
    assert_eq!(g.close_count(), 2);

    let failing = Arc::new(MockSource::failing_close("shutdown failed"));
    let query = ObjectQuery::new(failing);
    let err = query.close().expect_err("Close errors must not be swallowed");
    assert!(matches!(
        err,
        DBError::Query(QueryError::ExecutionError(_))
    ));
}

#[test]
fn test_end_to_end_example() {
    // 规约示例：片段链 + list 产出两个由解析器转换的 Person
    let (g, mut query) = setup();
    g.push_result(vec![person_vertex(1, "Alice", 30), person_vertex(2, "Bob", 25)]);

    query.by(vec![
        Box::new(HasLabel::of("person")),
        Box::new(|t: Traversal| t.as_("a").select_one("a")),
    ]);
    let people: Vec<Person> = query.list().expect("End-to-end conversion");

    assert_eq!(people.len(), 2);
    assert_eq!(g.execute_count(), 1);
}
