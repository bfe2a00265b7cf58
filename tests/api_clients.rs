mod common;

#[cfg(test)]
mod tests {
    use super::common::session_for;
    use reqwest::StatusCode;
    use taskbase::api::rest::query_params;
    use taskbase::api::{ApiError, BackendClient, SupabaseTasks, TaskStore};
    use taskbase::libs::config::BackendConfig;
    use taskbase::libs::task::{TaskFilter, TaskOrder, TaskPatch, TaskPredicate};
    use uuid::Uuid;

    fn client() -> BackendClient {
        BackendClient::new(&BackendConfig {
            url: "https://project.supabase.co/".to_string(),
            anon_key: "anon".to_string(),
        })
    }

    fn pairs(params: &[(String, String)]) -> Vec<(&str, &str)> {
        params.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect()
    }

    #[test]
    fn test_active_filter_query() {
        let user_id = Uuid::parse_str("0b6b4b7e-52b7-4c4c-9a5e-1f2b3c4d5e6f").unwrap();
        let params = query_params(&TaskFilter::Active.predicate(user_id), Some(TaskOrder::CreatedAtDesc));

        assert_eq!(
            pairs(&params),
            vec![
                ("user_id", "eq.0b6b4b7e-52b7-4c4c-9a5e-1f2b3c4d5e6f"),
                ("is_complete", "eq.false"),
                ("is_archived", "eq.false"),
                ("order", "created_at.desc"),
            ]
        );
    }

    #[test]
    fn test_single_task_query_without_order() {
        let user_id = Uuid::nil();
        let params = query_params(&TaskPredicate::for_user(user_id).id(42), None);

        assert_eq!(
            pairs(&params),
            vec![("id", "eq.42"), ("user_id", "eq.00000000-0000-0000-0000-000000000000")]
        );
    }

    #[test]
    fn test_url_joins_path() {
        assert_eq!(client().url("/rest/v1/tasks"), "https://project.supabase.co/rest/v1/tasks");
        assert_eq!(client().url("auth/v1/token"), "https://project.supabase.co/auth/v1/token");
    }

    #[test]
    fn test_requests_carry_api_key_and_bearer() {
        let req = client().get("rest/v1/tasks", Some("user-token")).unwrap().build().unwrap();
        assert_eq!(req.headers()["apikey"], "anon");
        assert_eq!(req.headers()["authorization"], "Bearer user-token");

        let anonymous = client().post("auth/v1/signup", None).unwrap().build().unwrap();
        assert_eq!(anonymous.headers()["authorization"], "Bearer anon");
    }

    #[tokio::test]
    async fn test_unscoped_writes_are_refused_locally() {
        let store = SupabaseTasks::new(client());
        let session = session_for(Uuid::new_v4(), None);

        let update = store.update(&session, &TaskPatch::complete(true), &TaskPredicate::default()).await.unwrap_err();
        let delete = store.delete(&session, &TaskPredicate::default()).await.unwrap_err();

        assert_eq!(update.to_string(), "Refusing to modify tasks without a filter");
        assert_eq!(delete.to_string(), "Refusing to modify tasks without a filter");
    }

    #[test]
    fn test_error_message_from_auth_body() {
        let err = ApiError::from_body(
            StatusCode::BAD_REQUEST,
            r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#,
        );
        assert_eq!(err.to_string(), "Invalid login credentials");
        assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));

        let err = ApiError::from_body(StatusCode::UNPROCESSABLE_ENTITY, r#"{"code":422,"msg":"User already registered"}"#);
        assert_eq!(err.to_string(), "User already registered");
    }

    #[test]
    fn test_error_message_from_rest_body() {
        let err = ApiError::from_body(
            StatusCode::FORBIDDEN,
            r#"{"code":"42501","details":null,"hint":null,"message":"new row violates row-level security policy for table \"tasks\""}"#,
        );
        assert_eq!(err.to_string(), r#"new row violates row-level security policy for table "tasks""#);
    }

    #[test]
    fn test_error_message_fallbacks() {
        assert_eq!(ApiError::from_body(StatusCode::BAD_GATEWAY, "upstream timeout").to_string(), "upstream timeout");
        assert_eq!(ApiError::from_body(StatusCode::NOT_FOUND, "").to_string(), "Not Found");
        assert_eq!(ApiError::from_body(StatusCode::BAD_REQUEST, r#"{"msg":""}"#).to_string(), r#"{"msg":""}"#);
    }
}
