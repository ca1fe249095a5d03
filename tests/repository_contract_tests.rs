use std::sync::Arc;

use chrono::{Duration, Utc};

use quizline::{
    models::domain::{Question, QuizResult},
    repositories::{InMemoryResultRepository, ResultRepository},
    services::ResultsService,
};

fn result(user_name: &str, score: i32, hours_ago: i64) -> QuizResult {
    let mut result = QuizResult::new(user_name, score, score / 10, 10);
    result.date = Utc::now() - Duration::hours(hours_ago);
    result
}

async fn assert_result_repository_contract(repo: Arc<dyn ResultRepository>) {
    assert_eq!(repo.count().await.unwrap(), 0);
    assert!(repo.get_all().await.unwrap().is_empty());

    let first = repo.add(result("first", 60, 2)).await.unwrap();
    let second = repo.add(result("second", 90, 1)).await.unwrap();
    assert_eq!(repo.count().await.unwrap(), 2);

    let fetched = repo.get(&first.id).await.unwrap().expect("first result stored");
    assert_eq!(fetched, first);
    assert!(repo.get("missing").await.unwrap().is_none());

    let mut updated = second.clone();
    updated.user_name = "second-renamed".to_string();
    repo.add(updated.clone()).await.unwrap();
    assert_eq!(repo.count().await.unwrap(), 2);
    assert_eq!(
        repo.get(&second.id).await.unwrap().unwrap().user_name,
        "second-renamed"
    );

    let all = repo.get_all().await.unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].id, second.id);
    assert_eq!(all[1].id, first.id);
}

#[tokio::test]
async fn in_memory_result_repository_satisfies_contract() {
    assert_result_repository_contract(Arc::new(InMemoryResultRepository::new())).await;
}

#[tokio::test]
async fn stored_result_keeps_asked_questions() {
    let repo = InMemoryResultRepository::new();
    let question = Question::new(
        "q-1",
        "2 + 2?",
        vec!["3".into(), "4".into(), "5".into(), "22".into()],
    )
    .unwrap();
    let saved = repo
        .add(QuizResult::new("Ana", 100, 1, 1).with_questions(vec![question.clone()]))
        .await
        .unwrap();

    let loaded = repo.get(&saved.id).await.unwrap().unwrap();
    assert_eq!(loaded.questions, vec![question]);
}

#[tokio::test]
async fn save_then_load_observes_the_saved_record() {
    let repo = Arc::new(InMemoryResultRepository::with_results(vec![
        result("A", 80, 3),
        result("B", 70, 4),
        result("C", 70, 5),
    ]));
    let service = ResultsService::new(repo);

    let before: Vec<_> = service
        .load_results()
        .await
        .into_iter()
        .map(|r| r.user_name)
        .collect();
    assert_eq!(before, ["A", "B", "C"]);
    assert_eq!(service.average_score().await, 73);

    service
        .save_result(QuizResult::new("New", 90, 9, 10))
        .await
        .unwrap();

    let after: Vec<_> = service
        .load_results()
        .await
        .into_iter()
        .map(|r| r.user_name)
        .collect();
    assert_eq!(after, ["New", "A", "B", "C"]);
    assert!(service.last_error().await.is_none());
    assert_eq!(service.statistics().await.total_quizzes, 4);
}
