#[cfg(test)]
mod tests {
    use crate::error::MapsError;
    use crate::models::DistanceMatrixResponse;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> DistanceMatrixResponse {
        serde_json::from_value(value).expect("response should deserialize")
    }

    #[test]
    fn test_well_formed_response() {
        let response = parse(json!({
            "status": "OK",
            "rows": [{
                "elements": [{
                    "status": "OK",
                    "duration": { "text": "30 mins", "value": 1800 },
                    "distance": { "text": "21.4 km", "value": 21400 }
                }]
            }]
        }));

        assert_eq!(response.first_leg_seconds().unwrap(), 1800.0);
        assert_eq!(response.first_leg_minutes().unwrap(), 30.0);
    }

    #[test]
    fn test_fractional_minutes_are_kept() {
        let response = parse(json!({
            "rows": [{ "elements": [{ "status": "OK", "duration": { "value": 615 } }] }]
        }));

        assert_eq!(response.first_leg_minutes().unwrap(), 10.25);
    }

    #[test]
    fn test_missing_rows() {
        let response = parse(json!({
            "status": "REQUEST_DENIED",
            "error_message": "The provided API key is invalid."
        }));

        assert!(matches!(
            response.first_leg_minutes(),
            Err(MapsError::MissingField("rows"))
        ));
    }

    #[test]
    fn test_empty_rows() {
        let response = parse(json!({ "status": "OK", "rows": [] }));

        assert!(matches!(
            response.first_leg_minutes(),
            Err(MapsError::MissingField("rows"))
        ));
    }

    #[test]
    fn test_missing_elements() {
        let response = parse(json!({ "rows": [{}] }));

        assert!(matches!(
            response.first_leg_minutes(),
            Err(MapsError::MissingField("elements"))
        ));
    }

    #[test]
    fn test_empty_elements() {
        let response = parse(json!({ "rows": [{ "elements": [] }] }));

        assert!(matches!(
            response.first_leg_minutes(),
            Err(MapsError::MissingField("elements"))
        ));
    }

    #[test]
    fn test_non_ok_element_status() {
        for status in ["NOT_FOUND", "ZERO_RESULTS", "MAX_ROUTE_LENGTH_EXCEEDED"] {
            let response = parse(json!({
                "rows": [{ "elements": [{ "status": status }] }]
            }));

            match response.first_leg_minutes() {
                Err(MapsError::ElementStatus { status: reported }) => assert_eq!(reported, status),
                other => panic!("expected element status error for {}, got {:?}", status, other),
            }
        }
    }

    #[test]
    fn test_missing_element_status() {
        let response = parse(json!({
            "rows": [{ "elements": [{ "duration": { "value": 600 } }] }]
        }));

        assert!(matches!(
            response.first_leg_minutes(),
            Err(MapsError::ElementStatus { .. })
        ));
    }

    #[test]
    fn test_ok_status_without_duration() {
        let response = parse(json!({
            "rows": [{ "elements": [{ "status": "OK" }] }]
        }));

        assert!(matches!(
            response.first_leg_minutes(),
            Err(MapsError::MissingField("duration.value"))
        ));
    }
}
