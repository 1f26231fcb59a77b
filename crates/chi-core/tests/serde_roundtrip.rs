use chi_core::{Distribution, Part, PlasmaParams, TensorComponent};

#[test]
fn plasma_params_roundtrip_through_json() {
    let params = PlasmaParams {
        distribution: Distribution::Kappa,
        part: Part::Imaginary,
        component: TensorComponent::new(1, 3).expect("component"),
        ..PlasmaParams::default()
    };
    let json = serde_json::to_value(params).expect("serialize");
    let back: PlasmaParams = serde_json::from_value(json).expect("deserialize");
    assert_eq!(back, params);
}

#[test]
fn missing_fields_take_defaults() {
    let params: PlasmaParams =
        serde_json::from_str(r#"{"magnetic_field": 2.0, "distribution": "kappa"}"#)
            .expect("deserialize");
    assert_eq!(params.magnetic_field, 2.0);
    assert_eq!(params.distribution, Distribution::Kappa);
    assert_eq!(params.kappa, 3.5);
    assert_eq!(params.component, TensorComponent::new(2, 2).expect("component"));
}

#[test]
fn selectors_serialize_as_labels() {
    let json = serde_json::to_value(PlasmaParams::default()).expect("serialize");
    assert_eq!(json["component"], 22);
    assert_eq!(json["distribution"], "power-law");
    assert_eq!(json["part"], "real");
}

#[test]
fn invalid_component_fails_to_deserialize() {
    let mut json = serde_json::to_value(PlasmaParams::default()).expect("serialize");
    json["component"] = serde_json::json!(44);
    assert!(serde_json::from_value::<PlasmaParams>(json).is_err());
}
