use prep_core::model::{
    ExperienceDraft, ExperienceId, Question, QuestionId, Subject, SubjectIcon, SubjectId, Subtopic,
    SubtopicId, User, UserId,
};
use prep_core::time::fixed_now;
use storage::{CatalogRepository, ExperienceRepository, InMemoryStore, SessionRepository};
use uuid::Uuid;

fn seed_catalog(store: &InMemoryStore) {
    let os = SubjectId::new(1);
    store.seed_subject(Subject::new(
        os,
        "Operating Systems",
        SubjectIcon::Server,
        "Scheduling, memory, concurrency.",
        2,
    ));
    store.seed_subject(Subject::new(
        SubjectId::new(2),
        "DBMS",
        SubjectIcon::Database,
        "SQL and transactions.",
        0,
    ));

    let scheduling = SubtopicId::new(11);
    store.seed_subtopic(Subtopic::new(scheduling, os, "CPU Scheduling"));
    store.seed_question(Question::new(
        QuestionId::new(101),
        scheduling,
        os,
        "Explain Round Robin Scheduling.",
        "Round Robin is a preemptive algorithm...",
    ));
    store.seed_question(Question::new(
        QuestionId::new(102),
        scheduling,
        os,
        "What is FCFS Scheduling?",
        "First Come First Serve is non-preemptive...",
    ));
}

#[tokio::test]
async fn catalog_listing_is_scoped_by_subject() {
    let store = InMemoryStore::new();
    seed_catalog(&store);

    let subjects = store.list_subjects().await.unwrap();
    assert_eq!(subjects.len(), 2);

    let os_questions = store.list_questions(SubjectId::new(1)).await.unwrap();
    assert_eq!(os_questions.len(), 2);

    let dbms_questions = store.list_questions(SubjectId::new(2)).await.unwrap();
    assert!(dbms_questions.is_empty());

    let subtopics = store.list_subtopics(SubjectId::new(1)).await.unwrap();
    assert_eq!(subtopics.len(), 1);
    assert_eq!(subtopics[0].name, "CPU Scheduling");
}

#[tokio::test]
async fn session_reflects_what_was_set() {
    let store = InMemoryStore::new();
    let user = User::new(UserId::new(Uuid::new_v4()), "Asha", "asha@example.com");

    store.set_session(Some(user.clone()));
    assert_eq!(store.read_session().await.unwrap(), Some(user));

    store.set_session(None);
    assert!(store.read_session().await.unwrap().is_none());
}

#[tokio::test]
async fn public_listing_filters_private_experiences() {
    let store = InMemoryStore::new();
    let author = UserId::new(Uuid::new_v4());

    let mut draft = ExperienceDraft {
        company_name: "Acme".into(),
        role: "SWE".into(),
        content: "Two DSA rounds, one system design.".into(),
        offer_type: "full-time".into(),
        opportunity_type: "off-campus".into(),
        is_public: true,
        ..ExperienceDraft::default()
    };
    let public = draft
        .clone()
        .validate(ExperienceId::generate(), author, fixed_now())
        .unwrap();
    draft.is_public = false;
    draft.company_name = "Globex".into();
    let private = draft
        .validate(ExperienceId::generate(), author, fixed_now())
        .unwrap();

    store.insert_experience(&public).await.unwrap();
    store.insert_experience(&private).await.unwrap();

    let listed = store.list_public().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].company_name, "Acme");
}
