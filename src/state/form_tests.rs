use super::*;

const FULL_PARAMS: &str = "query=dolor+de+cabeza&strategy=ReciprocalRankFusion&sexo=F\
&edad_min=18&edad_max=65&peso_fts=30&peso_semantic=70&k=500";

mod slider {
    use super::*;

    #[test]
    fn value2_is_complement() {
        let mut slider = WeightSlider::default();
        slider.set(37);
        assert_eq!(slider.value1(), 37);
        assert_eq!(slider.value2(), 63);
    }

    #[test]
    fn set_clamps_out_of_range_positions() {
        let mut slider = WeightSlider::default();
        slider.set(140);
        assert_eq!((slider.value1(), slider.value2()), (100, 0));
        slider.set(-3);
        assert_eq!((slider.value1(), slider.value2()), (0, 100));
    }

    #[test]
    fn nudge_steps_within_bounds() {
        let mut slider = WeightSlider::new(98);
        slider.nudge(WEIGHT_STEP);
        assert_eq!(slider.value1(), 100);
        slider.nudge(-WEIGHT_STEP);
        assert_eq!(slider.value1(), 95);
    }
}

mod visibility {
    use super::*;

    #[test]
    fn fts_hides_conditional_and_slider() {
        let v = FieldVisibility::for_strategy(SearchStrategy::Fts);
        assert!(!v.conditional);
        assert!(!v.slider);
    }

    #[test]
    fn semantic_shows_conditional_only() {
        let v = FieldVisibility::for_strategy(SearchStrategy::Semantic);
        assert!(v.conditional);
        assert!(!v.slider);
    }

    #[test]
    fn fusion_shows_both() {
        let v = FieldVisibility::for_strategy(SearchStrategy::ReciprocalRankFusion);
        assert!(v.conditional);
        assert!(v.slider);
    }

    #[test]
    fn navigation_skips_hidden_fields() {
        let mut form = FormFilterState::new();
        assert_eq!(form.strategy(), SearchStrategy::Fts);

        let mut seen = Vec::new();
        for _ in 0..4 {
            form.select_next();
            seen.push(form.selected());
        }

        assert!(!seen.contains(&FormField::Neighbors));
        assert!(!seen.contains(&FormField::Weights));
        assert_eq!(seen.last(), Some(&FormField::Strategy), "wraps after AgeMax");
    }

    #[test]
    fn hiding_selected_field_moves_selection_to_strategy() {
        let mut form = FormFilterState::new();
        form.set_strategy(SearchStrategy::ReciprocalRankFusion);
        assert!(form.select(FormField::Weights));

        form.set_strategy(SearchStrategy::Semantic);

        assert_eq!(form.selected(), FormField::Strategy);
    }

    #[test]
    fn hidden_field_cannot_be_selected() {
        let mut form = FormFilterState::new();
        assert!(!form.select(FormField::Neighbors));
    }
}

mod editing {
    use super::*;

    #[test]
    fn adjust_strategy_cycles_and_updates_visibility() {
        let mut form = FormFilterState::new();
        form.adjust_selected(1);
        assert_eq!(form.strategy(), SearchStrategy::Semantic);
        assert!(form.visibility().conditional);
        form.adjust_selected(-1);
        assert_eq!(form.strategy(), SearchStrategy::Fts);
    }

    #[test]
    fn digits_build_numbers() {
        let mut form = FormFilterState::new();
        form.select(FormField::AgeMin);
        form.pop_digit();
        form.push_digit('2');
        form.push_digit('5');
        assert_eq!(form.age_min(), 25);
    }

    #[test]
    fn ages_cap_at_max() {
        let mut form = FormFilterState::new();
        form.select(FormField::AgeMax);
        form.push_digit('9');
        assert_eq!(form.age_max(), MAX_AGE);
    }

    #[test]
    fn digits_ignored_on_non_numeric_field() {
        let mut form = FormFilterState::new();
        assert!(!form.push_digit('3'));
    }

    #[test]
    fn neighbors_never_drop_below_one() {
        let mut form = FormFilterState::new();
        form.set_strategy(SearchStrategy::Semantic);
        form.select(FormField::Neighbors);
        for _ in 0..6 {
            form.pop_digit();
        }
        assert_eq!(form.neighbors(), 1);
    }
}

mod snapshot {
    use super::*;

    #[test]
    fn full_snapshot_applies_every_field() {
        let snapshot = FormSnapshot::from_query_string(FULL_PARAMS).unwrap();
        let mut form = FormFilterState::new();

        form.apply_snapshot(snapshot);

        assert_eq!(form.search.text(), "dolor de cabeza");
        assert_eq!(form.strategy(), SearchStrategy::ReciprocalRankFusion);
        assert_eq!(form.sex(), Sex::F);
        assert_eq!(form.age_min(), 18);
        assert_eq!(form.age_max(), 65);
        assert_eq!(form.neighbors(), 500);
        assert_eq!(form.slider().value1(), 30);
        assert_eq!(form.slider().value2(), 70);
    }

    #[test]
    fn leading_question_mark_is_accepted() {
        let with_mark = format!("?{FULL_PARAMS}");
        assert!(FormSnapshot::from_query_string(&with_mark).is_some());
    }

    #[test]
    fn missing_parameter_rejects_whole_snapshot() {
        let partial = "query=tos&strategy=Fts&sexo=U&edad_min=0&edad_max=10&peso_fts=50";
        assert_eq!(FormSnapshot::from_query_string(partial), None);
    }

    #[test]
    fn invalid_value_rejects_whole_snapshot() {
        let bad = FULL_PARAMS.replace("strategy=ReciprocalRankFusion", "strategy=Nope");
        assert_eq!(FormSnapshot::from_query_string(&bad), None);
    }

    #[test]
    fn semantic_weight_is_derived_from_fts_weight() {
        let skewed = FULL_PARAMS.replace("peso_semantic=70", "peso_semantic=12");
        let mut form = FormFilterState::new();
        form.apply_snapshot(FormSnapshot::from_query_string(&skewed).unwrap());
        assert_eq!(form.slider().value2(), 70);
    }

    #[test]
    fn empty_string_leaves_defaults() {
        assert_eq!(FormSnapshot::from_query_string(""), None);
    }
}

#[test]
fn search_params_carry_slider_weights() {
    let mut form = FormFilterState::new();
    form.search.set_text("  tos  ");
    form.set_slider(80);

    let params = form.search_params(Some("tnea"));

    let get = |key: &str| {
        params
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    };
    assert_eq!(get("query"), Some("tos"));
    assert_eq!(get("doc"), Some("tnea"));
    assert_eq!(get("peso_fts"), Some("80"));
    assert_eq!(get("peso_semantic"), Some("20"));
    assert_eq!(get("strategy"), Some("Fts"));
}
