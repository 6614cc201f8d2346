//! Integration Tests for Feature Alignment and Prediction
//!
//! Exercises encode -> align -> classify -> decode together, against a
//! schema laid out like the real training frame.

#[cfg(test)]
mod integration_tests {
    use crate::logic::artifacts::Artifacts;
    use crate::logic::features::{
        column_name, encode_record, AccidentRecord, Field, TrainingSchema,
    };
    use crate::logic::model::forest::{ForestClassifier, ForestFile, TreeArrays};
    use crate::logic::model::{predict, LabelEncoder, Predictor, Severity};

    /// Training frame columns: every option of every field, the weekend
    /// flag kept as a raw bool column, plus one numeric column.
    fn training_columns() -> Vec<String> {
        let mut cols = vec!["ano".to_string()];
        for field in Field::ALL {
            if field.is_flag() {
                cols.push(field.prefix().to_string());
                continue;
            }
            for option in field.options() {
                cols.push(column_name(field, option));
            }
        }
        cols
    }

    fn schema() -> TrainingSchema {
        TrainingSchema::from_names(training_columns()).unwrap()
    }

    fn example_record() -> AccidentRecord {
        AccidentRecord {
            accident_type: "COLISAO TRASEIRA".into(),
            day_phase: "NOITE".into(),
            road_type: "DUPLA".into(),
            weather: "NORMAL".into(),
            vehicle_type: "AUTOMOVEL".into(),
            road_alignment: "RETA".into(),
            weekend: true,
            highway: "RECIFE-BR-101.0".into(),
        }
    }

    /// Two stumps: pedestrian hits at night -> victims, otherwise by vote
    fn forest(schema: &TrainingSchema) -> ForestClassifier {
        let stump = |column: &str, left: [f64; 2], right: [f64; 2]| TreeArrays {
            children_left: vec![1, -1, -1],
            children_right: vec![2, -1, -1],
            feature: vec![schema.position(column).unwrap() as i64, -2, -2],
            threshold: vec![0.5, -2.0, -2.0],
            value: vec![vec![1.0, 1.0], left.to_vec(), right.to_vec()],
        };

        ForestClassifier::from_file(&ForestFile {
            n_features: schema.len(),
            classes: vec![0, 1],
            trees: vec![
                stump("tipo_acidente_ATROPELAMENTO DE PEDESTRE", [3.0, 7.0], [9.0, 1.0]),
                stump("fase_dia_NOITE", [4.0, 6.0], [7.0, 3.0]),
                stump("final_semana", [5.0, 5.0], [6.0, 4.0]),
            ],
        })
        .unwrap()
    }

    fn predictor() -> Predictor {
        let schema = schema();
        let classifier = Box::new(forest(&schema));
        let encoder = LabelEncoder::from_classes(&["COM VITIMAS", "SEM VITIMAS"]).unwrap();
        Predictor::new(Artifacts::new(classifier, encoder, schema, "<memory>").unwrap())
    }

    /// Every combination of a few options per field
    fn sample_records() -> Vec<AccidentRecord> {
        let mut out = Vec::new();
        for accident in ["COLISAO TRASEIRA", "ATROPELAMENTO DE PEDESTRE", "INCENDIO"] {
            for phase in ["DIA", "NOITE"] {
                for weekend in [true, false] {
                    for highway in ["RECIFE-BR-101.0", "OUTROS", "PETROLINA-BR-428.0"] {
                        out.push(AccidentRecord {
                            accident_type: accident.into(),
                            day_phase: phase.into(),
                            weekend,
                            highway: highway.into(),
                            ..example_record()
                        });
                    }
                }
            }
        }
        out
    }

    #[test]
    fn test_vector_always_matches_schema() {
        let schema = schema();
        for record in sample_records() {
            let alignment = schema.align(&encode_record(&record));
            assert!(alignment.vector.matches(&schema));
            assert_eq!(alignment.vector.len(), schema.len());
        }
    }

    #[test]
    fn test_example_record_sets_exactly_its_columns() {
        let schema = schema();
        let vector = schema.align(&encode_record(&example_record())).vector;

        let expected = [
            "tipo_acidente_COLISAO TRASEIRA",
            "fase_dia_NOITE",
            "tipo_pista_DUPLA",
            "condicao_tempo_NORMAL",
            "tipo_veiculo_AUTOMOVEL",
            "tracado_via_unico_RETA",
            "final_semana",
            "rodovia_RECIFE-BR-101.0",
        ];
        for name in expected {
            assert_eq!(vector.get_by_name(&schema, name), Some(1.0), "{}", name);
        }
        assert_eq!(vector.active_indices().len(), expected.len());
        assert_eq!(vector.get_by_name(&schema, "ano"), Some(0.0));
    }

    #[test]
    fn test_example_record_prediction() {
        let p = predictor().predict(&example_record()).unwrap();
        assert!(Severity::ALL.contains(&p.severity));
        // NOITE and weekend both vote for victims
        assert_eq!(p.severity, Severity::WithVictims);
        assert!(p.unseen_columns.is_empty());

        let proba = p.probabilities.expect("forest exposes probabilities");
        let total: f32 = proba.iter().map(|c| c.probability).sum();
        assert!((total - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_prediction_is_deterministic() {
        let predictor = predictor();
        for record in sample_records() {
            let a = predictor.predict(&record).unwrap();
            let b = predictor.predict(&record).unwrap();
            assert_eq!(a.severity, b.severity);
            assert_eq!(a.class_code, b.class_code);
            assert_eq!(a.probabilities, b.probabilities);
        }
    }

    #[test]
    fn test_unseen_category_degrades_to_zeros() {
        let schema = schema();
        let record = AccidentRecord {
            highway: "PETROLINA-BR-428.0".into(),
            ..example_record()
        };

        let vector = schema.align(&encode_record(&record)).vector;
        let highway_cols: Vec<usize> = schema
            .names()
            .enumerate()
            .filter(|(_, n)| n.starts_with("rodovia_"))
            .map(|(i, _)| i)
            .collect();
        assert!(highway_cols.iter().all(|&i| vector.get(i) == Some(0.0)));

        let p = predictor().predict(&record).unwrap();
        assert_eq!(p.unseen_columns, vec!["rodovia_PETROLINA-BR-428.0".to_string()]);
    }

    #[test]
    fn test_output_is_always_a_known_class() {
        let predictor = predictor();
        for record in sample_records() {
            let p = predictor.predict(&record).unwrap();
            assert!(matches!(p.label(), "COM VITIMAS" | "SEM VITIMAS"));
        }
    }

    #[test]
    fn test_indicator_spelled_weekend_schema() {
        // Same frame but with the flag dummied as final_semana_True/False
        let cols: Vec<String> = training_columns()
            .into_iter()
            .flat_map(|c| {
                if c == "final_semana" {
                    vec!["final_semana_False".to_string(), "final_semana_True".to_string()]
                } else {
                    vec![c]
                }
            })
            .collect();
        let schema = TrainingSchema::from_names(cols).unwrap();

        let alignment = schema.align(&encode_record(&example_record()));
        assert_eq!(
            alignment.vector.get_by_name(&schema, "final_semana_True"),
            Some(1.0)
        );
        assert_eq!(
            alignment.vector.get_by_name(&schema, "final_semana_False"),
            Some(0.0)
        );
        assert!(alignment.unseen.is_empty());
        assert_eq!(alignment.dropped, vec!["final_semana".to_string()]);

        let encoder = LabelEncoder::from_classes(&["COM VITIMAS", "SEM VITIMAS"]).unwrap();
        let classifier = ForestClassifier::from_file(&ForestFile {
            n_features: schema.len(),
            classes: vec![0, 1],
            trees: vec![TreeArrays {
                children_left: vec![-1],
                children_right: vec![-1],
                feature: vec![-2],
                threshold: vec![-2.0],
                value: vec![vec![1.0, 9.0]],
            }],
        })
        .unwrap();
        let p = predict(&example_record(), &classifier, &encoder, &schema).unwrap();
        assert_eq!(p.severity, Severity::WithoutVictims);
    }
}
