use super::*;

#[test]
fn new_query_is_idle() {
    let q = TextQuery::new(QueryKind::Text);
    assert_eq!(q.kind(), QueryKind::Text);
    assert!(!q.is_pending());
    assert!(q.result().is_none());
    assert!(q.error().is_none());
}

#[test]
fn begin_refuses_while_pending() {
    let mut q = TextQuery::new(QueryKind::Text);
    assert!(q.begin().is_some());
    assert!(q.is_pending());
    assert!(q.begin().is_none());
}

#[test]
fn settle_success_stores_result_and_clears_pending() {
    let mut q = TextQuery::new(QueryKind::Text);
    let ticket = q.begin().unwrap();
    assert!(q.settle(ticket, &Ok(vec![])));
    assert!(!q.is_pending());
    assert_eq!(q.result(), Some(&vec![]));
    assert!(q.begin().is_some());
}

#[test]
fn settle_error_keeps_previous_result() {
    let mut q = ImageQuery::new(QueryKind::Image);
    let first = q.begin().unwrap();
    q.settle(first, &Ok(QueryResponse::Text("ok".into())));

    let second = q.begin().unwrap();
    q.settle(second, &Err(QueryError::EmptyResponse));
    assert_eq!(q.error(), Some(&QueryError::EmptyResponse));
    assert_eq!(q.result(), Some(&QueryResponse::Text("ok".into())));
}

#[test]
fn begin_clears_previous_error() {
    let mut q = TextQuery::new(QueryKind::Text);
    let t = q.begin().unwrap();
    q.settle(t, &Err(QueryError::Transport("down".into())));
    assert!(q.error().is_some());
    q.begin().unwrap();
    assert!(q.error().is_none());
}

#[test]
fn stale_outcome_is_ignored() {
    let mut q = TextQuery::new(QueryKind::Text);
    let old = q.begin().unwrap();
    assert!(q.settle(old, &Ok(vec![])));
    let current = q.begin().unwrap();

    assert!(!q.settle(old, &Err(QueryError::EmptyResponse)));
    assert!(q.is_pending());
    assert!(q.error().is_none());
    assert!(q.settle(current, &Ok(vec![])));
}

#[test]
fn double_settle_is_ignored() {
    let mut q = TextQuery::new(QueryKind::Text);
    let t = q.begin().unwrap();
    assert!(q.settle(t, &Ok(vec![])));
    assert!(!q.settle(t, &Err(QueryError::EmptyResponse)));
    assert!(q.error().is_none());
}
