//! Feature Vector Assembly

use crate::applicant::ApplicantInput;
use crate::schema::FeatureSchema;
use crate::{COUNTRY_PREFIX, VISA_TYPE_PREFIX};

/// Feature vector for ML inference, aligned to the schema it was built against
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector<'a> {
    /// Schema giving each value its name
    schema: &'a FeatureSchema,
    /// Raw feature values, one per schema entry
    values: Vec<f64>,
}

impl<'a> FeatureVector<'a> {
    /// Schema this vector is aligned to
    pub fn schema(&self) -> &'a FeatureSchema {
        self.schema
    }

    /// Values in schema order
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Value of a named feature
    pub fn get(&self, name: &str) -> Option<f64> {
        self.schema.position(name).map(|idx| self.values[idx])
    }

    /// Number of features
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// (name, value) pairs in schema order
    pub fn iter(&self) -> impl Iterator<Item = (&'a str, f64)> + '_ {
        self.schema
            .names()
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }
}

/// Encode applicant fields into a vector matching `schema` column for column.
///
/// Every slot starts at zero. Numeric slots (`age`, `travel_history_count`,
/// `application_month`) take the raw input value when the schema carries them
/// and are dropped otherwise. The categorical fields set `country_<value>` and
/// `visa_type_<value>` to one when those exact names exist; an unseen category
/// leaves every slot of that field at zero.
pub fn encode<'a>(input: &ApplicantInput, schema: &'a FeatureSchema) -> FeatureVector<'a> {
    let mut values = vec![0.0; schema.len()];

    let numeric = [
        ("age", input.age),
        ("travel_history_count", input.travel_history_count),
        ("application_month", input.application_month),
    ];
    for (name, value) in numeric {
        if let Some(idx) = schema.position(name) {
            values[idx] = f64::from(value);
        }
    }

    let one_hot = [
        format!("{COUNTRY_PREFIX}{}", input.country),
        format!("{VISA_TYPE_PREFIX}{}", input.visa_type),
    ];
    for key in &one_hot {
        if let Some(idx) = schema.position(key) {
            values[idx] = 1.0;
        }
    }

    FeatureVector { schema, values }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn example_schema() -> FeatureSchema {
        FeatureSchema::new([
            "age",
            "travel_history_count",
            "application_month",
            "country_India",
            "country_USA",
            "visa_type_Tourist",
            "visa_type_Work",
        ])
        .unwrap()
    }

    #[test]
    fn test_reference_example() {
        let schema = example_schema();
        let input = ApplicantInput::new("India", "Tourist", 3, 30, 5);

        let features = encode(&input, &schema);

        assert_eq!(features.values(), &[30.0, 5.0, 3.0, 1.0, 0.0, 1.0, 0.0]);
        let named: Vec<_> = features.iter().collect();
        assert_eq!(named[0], ("age", 30.0));
        assert_eq!(named[6], ("visa_type_Work", 0.0));
    }

    #[test]
    fn test_unknown_country_leaves_one_hot_zero() {
        let schema = example_schema();
        let input = ApplicantInput::new("Mars", "Work", 7, 41, 0);

        let features = encode(&input, &schema);

        assert_eq!(features.get("country_India"), Some(0.0));
        assert_eq!(features.get("country_USA"), Some(0.0));
        assert_eq!(features.get("visa_type_Work"), Some(1.0));
        assert_eq!(features.len(), schema.len());
    }

    #[test]
    fn test_category_match_is_case_sensitive() {
        let schema = example_schema();
        let input = ApplicantInput::new("india", "tourist", 1, 25, 2);

        let features = encode(&input, &schema);

        assert!(features.iter().skip(3).all(|(_, v)| v == 0.0));
    }

    #[test]
    fn test_missing_numeric_slot_is_dropped() {
        let schema = FeatureSchema::new(["country_UK", "age"]).unwrap();
        let input = ApplicantInput::new("UK", "Student", 11, 19, 4);

        let features = encode(&input, &schema);

        assert_eq!(features.values(), &[1.0, 19.0]);
        assert_eq!(features.get("application_month"), None);
    }

    #[test]
    fn test_empty_schema() {
        let schema = FeatureSchema::new(Vec::<String>::new()).unwrap();
        let features = encode(&ApplicantInput::new("UK", "Work", 1, 1, 1), &schema);
        assert!(features.is_empty());
    }

    fn arb_schema() -> impl Strategy<Value = FeatureSchema> {
        let countries = prop::collection::hash_set("[A-Z][a-z]{1,8}", 0..8);
        let visas = prop::collection::hash_set("[A-Z][a-z]{1,8}", 0..5);
        let numeric = prop::sample::subsequence(crate::NUMERIC_FEATURES.to_vec(), 0..=3);

        (countries, visas, numeric)
            .prop_map(|(countries, visas, numeric)| {
                let mut names: Vec<String> = numeric.into_iter().map(String::from).collect();
                names.extend(countries.into_iter().map(|c| format!("country_{c}")));
                names.extend(visas.into_iter().map(|v| format!("visa_type_{v}")));
                names
            })
            .prop_shuffle()
            .prop_map(|names| FeatureSchema::new(names).unwrap())
    }

    fn arb_input() -> impl Strategy<Value = ApplicantInput> {
        (
            "[A-Z][a-z]{1,8}",
            "[A-Z][a-z]{1,8}",
            1u32..=12,
            0u32..=100,
            0u32..=50,
        )
            .prop_map(|(country, visa, month, age, travel)| {
                ApplicantInput::new(country, visa, month, age, travel)
            })
    }

    proptest! {
        #[test]
        fn prop_dimension_and_order_match_schema(schema in arb_schema(), input in arb_input()) {
            let features = encode(&input, &schema);
            prop_assert_eq!(features.len(), schema.len());
            let names: Vec<&str> = features.iter().map(|(n, _)| n).collect();
            let expected: Vec<&str> = schema.names().iter().map(String::as_str).collect();
            prop_assert_eq!(names, expected);
        }

        #[test]
        fn prop_country_one_hot(schema in arb_schema(), input in arb_input()) {
            let features = encode(&input, &schema);
            let own = format!("country_{}", input.country);
            for (name, value) in features.iter().filter(|(n, _)| n.starts_with("country_")) {
                let expected = if name == own { 1.0 } else { 0.0 };
                prop_assert_eq!(value, expected);
            }
        }

        #[test]
        fn prop_unknown_country_all_zero(schema in arb_schema(), input in arb_input()) {
            let input = ApplicantInput { country: "Mars1".to_string(), ..input };
            let features = encode(&input, &schema);
            prop_assert!(features
                .iter()
                .filter(|(n, _)| n.starts_with("country_"))
                .all(|(_, v)| v == 0.0));
        }

        #[test]
        fn prop_encode_is_deterministic(schema in arb_schema(), input in arb_input()) {
            prop_assert_eq!(encode(&input, &schema), encode(&input, &schema));
        }

        #[test]
        fn prop_age_passthrough(schema in arb_schema(), input in arb_input(), country in "[A-Z][a-z]{1,8}") {
            let input = ApplicantInput { country, ..input };
            let features = encode(&input, &schema);
            if schema.contains("age") {
                prop_assert_eq!(features.get("age"), Some(f64::from(input.age)));
            }
        }
    }
}
