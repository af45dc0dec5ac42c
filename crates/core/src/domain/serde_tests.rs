#[cfg(test)]
mod tests {
    use crate::domain::catalog::{Catalog, Mode, Tone};
    use crate::domain::error::{AppError, ErrorCode};
    use crate::domain::request::{RequestState, RewriteConfiguration, StateTransition};

    #[test]
    fn test_request_state_serialization() {
        assert_eq!(
            serde_json::to_string(&RequestState::Idle).unwrap(),
            "\"idle\""
        );
        assert_eq!(
            serde_json::to_string(&RequestState::Loading).unwrap(),
            "\"loading\""
        );
        assert_eq!(
            serde_json::to_string(&RequestState::Succeeded).unwrap(),
            "\"succeeded\""
        );

        let failed = RequestState::Failed {
            message: "Error: Failed to rewrite text. Please try again.".to_string(),
        };
        let json = serde_json::to_string(&failed).unwrap();
        assert!(json.contains("failed"));
        assert!(json.contains("Please try again"));
    }

    #[test]
    fn test_error_code_serialization() {
        assert_eq!(
            serde_json::to_string(&ErrorCode::Catalog).unwrap(),
            "\"E_CATALOG\""
        );
        assert_eq!(
            serde_json::to_string(&ErrorCode::Rewrite).unwrap(),
            "\"E_REWRITE\""
        );
        assert_eq!(
            serde_json::to_string(&ErrorCode::InvalidState).unwrap(),
            "\"E_INVALID_STATE\""
        );
    }

    #[test]
    fn test_app_error_serialization() {
        let err = AppError::invalid_state("test");
        let json = serde_json::to_string(&err).unwrap();
        assert!(json.contains("E_INVALID_STATE"));
        assert!(json.contains("recoverable"));
    }

    #[test]
    fn test_catalog_roundtrip() {
        let catalog = Catalog {
            modes: vec![Mode {
                id: "humanize".to_string(),
                name: "Humanize Mode".to_string(),
                description: "Light, natural adjustments".to_string(),
            }],
            tones: vec![Tone {
                id: "academic".to_string(),
                name: "Academic".to_string(),
                description: "Scholarly, precise language".to_string(),
            }],
        };
        let json = serde_json::to_string(&catalog).unwrap();
        let roundtrip: Catalog = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip.modes, catalog.modes);
        assert_eq!(roundtrip.tones, catalog.tones);
    }

    #[test]
    fn test_state_transition_serialization() {
        let t = StateTransition {
            request_id: "req-1".to_string(),
            prev_state: "idle".to_string(),
            new_state: RequestState::Loading,
            timestamp: "2025-01-15T10:30:00Z".to_string(),
        };
        let json = serde_json::to_string(&t).unwrap();
        assert!(json.contains("req-1"));
        assert!(json.contains("idle"));
        assert!(json.contains("loading"));
    }

    #[test]
    fn test_configuration_serialization() {
        let c = RewriteConfiguration::new("manual", "casual", 70);
        let json = serde_json::to_string(&c).unwrap();
        assert!(json.contains("\"percentage\":70"));

        let c = RewriteConfiguration::new("extreme", "casual", 70);
        let json = serde_json::to_string(&c).unwrap();
        assert!(json.contains("\"percentage\":null"));
    }
}
