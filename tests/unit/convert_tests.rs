// YAML <-> JSON conversion through the public API

use cfn_sphere::{convert_json_to_yaml_string, convert_yaml_to_json_string};

#[test]
fn test_convert_yaml_to_json_string_returns_valid_json_string() {
    let data = "\nfoo:\n  foo: baa\n";

    assert_eq!(
        convert_yaml_to_json_string(data).unwrap(),
        "{\n  \"foo\": {\n    \"foo\": \"baa\"\n  }\n}"
    );
}

#[test]
fn test_convert_yaml_to_json_string_returns_empty_object_on_empty_input() {
    assert_eq!(convert_yaml_to_json_string("").unwrap(), "{}");
}

#[test]
fn test_convert_json_to_yaml_string_returns_valid_yaml_string() {
    let data = r#"
{
    "foo": {
        "foo": "baa"
    }
}
"#;

    assert_eq!(
        convert_json_to_yaml_string(data).unwrap(),
        "foo:\n  foo: baa\n"
    );
}

#[test]
fn test_convert_json_to_yaml_string_returns_empty_string_on_empty_json_input() {
    assert_eq!(convert_json_to_yaml_string("{}").unwrap(), "");
}

#[test]
fn test_yaml_json_round_trip_preserves_structure() {
    let yaml = r#"
AWSTemplateFormatVersion: "2010-09-09"
Parameters:
  Environment:
    Type: String
    AllowedValues: [dev, prod]
Resources:
  Bucket:
    Type: AWS::S3::Bucket
    Properties:
      Tags:
        - Key: team
          Value: platform
      VersioningConfiguration:
        Status: Enabled
"#;

    let json = convert_yaml_to_json_string(yaml).unwrap();
    let back = convert_json_to_yaml_string(&json).unwrap();

    let original: serde_yaml::Value = serde_yaml::from_str(yaml).unwrap();
    let round_tripped: serde_yaml::Value = serde_yaml::from_str(&back).unwrap();
    assert_eq!(original, round_tripped);

    // Output is parseable JSON
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(
        parsed["Resources"]["Bucket"]["Properties"]["Tags"][0]["Value"],
        "platform"
    );
}

#[test]
fn test_scalars_and_sequences_convert() {
    let json = convert_yaml_to_json_string("count: 3\nenabled: true\nitems:\n  - a\n  - b\n").unwrap();
    assert_eq!(
        json,
        "{\n  \"count\": 3,\n  \"enabled\": true,\n  \"items\": [\n    \"a\",\n    \"b\"\n  ]\n}"
    );
}

#[test]
fn test_short_form_intrinsics_become_long_form() {
    let yaml = "Outputs:\n  BucketArn:\n    Value: !GetAtt Bucket.Arn\n  Url:\n    Value: !Sub 'https://${Bucket}.example.com'\n";
    let json = convert_yaml_to_json_string(yaml).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(
        parsed["Outputs"]["BucketArn"]["Value"],
        serde_json::json!({"Fn::GetAtt": ["Bucket", "Arn"]})
    );
    assert_eq!(
        parsed["Outputs"]["Url"]["Value"],
        serde_json::json!({"Fn::Sub": "https://${Bucket}.example.com"})
    );
}

#[test]
fn test_malformed_documents_are_errors() {
    assert!(convert_yaml_to_json_string("foo: [unclosed").is_err());
    assert!(convert_json_to_yaml_string("{not json}").is_err());
}

#[test]
fn test_merge_keys_are_resolved() {
    let yaml = "base: &b\n  a: 1\nderived:\n  <<: *b\n  c: 2\n";
    let parsed: serde_json::Value =
        serde_json::from_str(&convert_yaml_to_json_string(yaml).unwrap()).unwrap();

    assert_eq!(parsed["derived"], serde_json::json!({"a": 1, "c": 2}));
    assert!(parsed["derived"].get("<<").is_none());
}

#[test]
fn test_infinite_float_is_rejected() {
    let err = convert_yaml_to_json_string("x: .inf\n").unwrap_err();
    assert!(matches!(err, cfn_sphere::CfnSphereError::Unrepresentable(_)));
}
