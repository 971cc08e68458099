use kanasu_core::chat::{ChatSession, MockChatResponder};
use kanasu_core::form::{CareerFormSession, InterestToggle, MAX_INTERESTS};
use kanasu_core::recommender::{MockRecommender, Recommender};
use kanasu_core::session::{select_career, selected_career, AuthSession, LanguageSession};
use kanasu_core::store::{KeyValueStore, CHAT_KEY};
use kanasu_core::types::{ChatMessage, ChatRole};
use kanasu_core::{KanasuError, Locale};
use tempfile::TempDir;

fn open(dir: &TempDir) -> KeyValueStore {
    let _ = env_logger::builder().is_test(true).try_init();
    KeyValueStore::new(Some(dir.path().join("kanasu.db"))).unwrap()
}

#[test]
fn test_chat_log_survives_reopen_in_order() {
    let dir = TempDir::new().unwrap();

    {
        let store = open(&dir);
        let mut chat = ChatSession::open(&store, &MockChatResponder).unwrap();
        for i in 0..4 {
            chat.send(&format!("question {i}"), Locale::En).unwrap();
        }
        assert_eq!(chat.messages().len(), 8);
    }

    let store = open(&dir);
    let chat = ChatSession::open(&store, &MockChatResponder).unwrap();
    let messages = chat.messages();
    assert_eq!(messages.len(), 8);
    for (i, pair) in messages.chunks(2).enumerate() {
        assert_eq!(pair[0], ChatMessage::user(&format!("question {i}")));
        assert_eq!(pair[1].role, ChatRole::Assistant);
        assert!(pair[1].content.contains(&format!("question {i}")));
    }
}

#[test]
fn test_stored_blob_is_plain_json_array() {
    let dir = TempDir::new().unwrap();
    let store = open(&dir);
    store
        .set_json(
            CHAT_KEY,
            &vec![ChatMessage::user("hi"), ChatMessage::assistant("hello")],
        )
        .unwrap();

    let raw = store.get_raw(CHAT_KEY).unwrap().unwrap();
    assert_eq!(
        raw,
        r#"[{"role":"user","content":"hi"},{"role":"assistant","content":"hello"}]"#
    );
}

#[test]
fn test_sessions_restore_after_reopen() {
    let dir = TempDir::new().unwrap();

    {
        let store = open(&dir);
        LanguageSession::new(&store).set_locale(Locale::Kn).unwrap();
        AuthSession::new(&store).login("student@kanasu.in", "pw").unwrap();
        let rec = MockRecommender::recommendations().remove(1);
        select_career(&store, &rec).unwrap();
    }

    let store = open(&dir);
    let auth = AuthSession::restore(&store).unwrap();
    let user = auth.current_user().unwrap();
    assert_eq!(user.email, "student@kanasu.in");
    assert_eq!(user.locale(), Locale::Kn);
    assert_eq!(LanguageSession::restore(&store).unwrap().locale(), Locale::Kn);
    assert_eq!(
        selected_career(&store).unwrap().unwrap().title_label,
        "Data Scientist"
    );
}

#[test]
fn test_interest_cap_then_predict() {
    let mut form = CareerFormSession::new();
    for tag in ["drawing", "photography", "coding", "robotics"] {
        form.toggle_interest(tag).unwrap();
    }
    assert_eq!(form.interests().len(), MAX_INTERESTS);

    let err = form.toggle_interest("sports").unwrap_err();
    assert_eq!(err.to_string(), "At most 4 interests can be selected");
    assert!(matches!(err, KanasuError::InterestLimit { .. }));

    assert_eq!(form.toggle_interest("coding").unwrap(), InterestToggle::Removed);
    assert!(form.can_select("sports"));

    form.update_skills("sketching, python");
    let request = form.to_predict_request(None);
    assert_eq!(request.skills, vec!["sketching", "python"]);
    let recs = MockRecommender.predict(&request).unwrap();
    assert_eq!(recs.len(), 3);
}
