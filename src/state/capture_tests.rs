use super::*;

fn table() -> ResultTable {
    ResultTable::new(
        vec!["id".into(), "nombre".into(), "edad".into()],
        vec![
            vec!["1".into(), "Ana".into(), "30".into()],
            vec!["2".into(), "Luis".into(), "41".into()],
            vec!["3".into(), "Eva".into()],
        ],
    )
}

fn attached_buffer(table: &ResultTable) -> (CaptureBuffer, TableGeneration) {
    let generation = TableGeneration::initial().next();
    let mut buffer = CaptureBuffer::new();
    buffer.on_table_replaced(&TableReplaced {
        generation,
        table: Some(table),
    });
    (buffer, generation)
}

mod gestures {
    use super::*;

    #[test]
    fn press_appends_full_column() {
        let table = table();
        let (mut buffer, generation) = attached_buffer(&table);

        let outcome = buffer.press(&table, generation, 1, "");

        assert_eq!(
            outcome,
            CaptureOutcome::Captured {
                label: "nombre".into(),
                appended: 3,
                query_recorded: false,
            }
        );
        assert_eq!(buffer.flat_values(), vec!["Ana", "Luis", "Eva"]);
        assert_eq!(buffer.item_count(), 3);
        assert!(buffer.export_enabled());
    }

    #[test]
    fn short_rows_contribute_empty_strings() {
        let table = table();
        let (mut buffer, generation) = attached_buffer(&table);

        buffer.press(&table, generation, 2, "");

        assert_eq!(buffer.flat_values(), vec!["30", "41", ""]);
    }

    #[test]
    fn second_press_while_holding_is_rejected() {
        let table = table();
        let (mut buffer, generation) = attached_buffer(&table);

        buffer.press(&table, generation, 0, "");
        let outcome = buffer.press(&table, generation, 1, "");

        assert_eq!(outcome, CaptureOutcome::AlreadyHolding);
        assert_eq!(buffer.item_count(), 3, "rejected press must not append");
        assert_eq!(buffer.columns().len(), 1);
    }

    #[test]
    fn release_returns_to_idle() {
        let table = table();
        let (mut buffer, generation) = attached_buffer(&table);

        buffer.press(&table, generation, 0, "");
        assert_eq!(buffer.hold_state(), HoldState::Holding { column: 0 });

        assert!(buffer.release());
        assert_eq!(buffer.hold_state(), HoldState::Idle);
        assert!(!buffer.release(), "release when idle reports no gesture");
    }

    #[test]
    fn capturing_same_header_twice_accumulates() {
        let table = table();
        let (mut buffer, generation) = attached_buffer(&table);

        buffer.press(&table, generation, 0, "");
        buffer.release();
        buffer.press(&table, generation, 0, "");
        buffer.release();

        assert_eq!(buffer.item_count(), 6);
        assert_eq!(buffer.labels(), vec!["id", "id"]);
    }

    #[test]
    fn out_of_range_column_is_detached() {
        let table = table();
        let (mut buffer, generation) = attached_buffer(&table);

        assert_eq!(buffer.press(&table, generation, 9, ""), CaptureOutcome::Detached);
        assert!(!buffer.is_holding());
    }
}

mod queries {
    use super::*;

    #[test]
    fn non_blank_search_is_recorded_once_per_gesture() {
        let table = table();
        let (mut buffer, generation) = attached_buffer(&table);

        buffer.press(&table, generation, 0, " fiebre ");

        assert_eq!(buffer.queries(), &[" fiebre ".to_string()]);
        assert_eq!(buffer.item_count(), 3);
    }

    #[test]
    fn blank_search_is_not_recorded() {
        let table = table();
        let (mut buffer, generation) = attached_buffer(&table);

        buffer.press(&table, generation, 0, "   ");

        assert!(buffer.queries().is_empty());
    }

    #[test]
    fn clear_queries_keeps_values() {
        let table = table();
        let (mut buffer, generation) = attached_buffer(&table);
        buffer.press(&table, generation, 0, "fiebre");

        buffer.clear_queries();

        assert!(buffer.queries().is_empty());
        assert_eq!(buffer.item_count(), 3);
    }
}

mod generations {
    use super::*;

    #[test]
    fn press_on_stale_generation_is_ignored() {
        let table = table();
        let (mut buffer, old) = attached_buffer(&table);
        let new = old.next();
        buffer.on_table_replaced(&TableReplaced {
            generation: new,
            table: Some(&table),
        });

        assert_eq!(buffer.press(&table, old, 0, ""), CaptureOutcome::Detached);
        assert!(matches!(
            buffer.press(&table, new, 0, ""),
            CaptureOutcome::Captured { .. }
        ));
    }

    #[test]
    fn table_without_results_detaches() {
        let table = table();
        let (mut buffer, generation) = attached_buffer(&table);
        buffer.on_table_replaced(&TableReplaced {
            generation: generation.next(),
            table: None,
        });

        assert_eq!(buffer.attached_generation(), None);
    }

    #[test]
    fn replacement_keeps_held_data() {
        let table = table();
        let (mut buffer, generation) = attached_buffer(&table);
        buffer.press(&table, generation, 0, "");
        buffer.release();

        buffer.on_table_replaced(&TableReplaced {
            generation: generation.next(),
            table: Some(&table),
        });

        assert_eq!(buffer.item_count(), 3);
    }
}

mod size {
    use super::*;

    #[test]
    fn empty_buffer_reads_zero() {
        let buffer = CaptureBuffer::new();
        assert_eq!(buffer.size_display(), "0 KB");
        assert_eq!(buffer.estimated_size_bytes(), 2);
    }

    #[test]
    fn size_matches_json_array_length() {
        let table = table();
        let (mut buffer, generation) = attached_buffer(&table);
        buffer.press(&table, generation, 1, "");

        let json = serde_json::to_string(&buffer.flat_values()).unwrap();
        assert_eq!(buffer.estimated_size_bytes(), json.len());
    }

    #[test]
    fn size_counts_escapes() {
        let table = ResultTable::new(
            vec!["c".into()],
            vec![vec!["say \"hi\"".into()], vec!["ñ".into()]],
        );
        let (mut buffer, generation) = attached_buffer(&table);
        buffer.press(&table, generation, 0, "");

        let json = serde_json::to_string(&buffer.flat_values()).unwrap();
        assert_eq!(buffer.estimated_size_bytes(), json.len());
    }

    #[test]
    fn size_display_has_two_decimals() {
        let table = table();
        let (mut buffer, generation) = attached_buffer(&table);
        buffer.press(&table, generation, 0, "");

        // ["1","2","3"] is 13 bytes
        assert_eq!(buffer.size_display(), "0.01 KB");
    }
}

mod take {
    use super::*;

    #[test]
    fn take_empties_buffer_and_counters() {
        let table = table();
        let (mut buffer, generation) = attached_buffer(&table);
        buffer.press(&table, generation, 0, "fiebre");
        buffer.release();

        let set = buffer.take();

        assert_eq!(set.flat_values(), vec!["1", "2", "3"]);
        assert_eq!(set.queries, vec!["fiebre".to_string()]);
        assert!(buffer.is_empty());
        assert_eq!(buffer.item_count(), 0);
        assert_eq!(buffer.size_display(), "0 KB");
        assert!(buffer.queries().is_empty());
        assert!(!buffer.export_enabled());
    }

    #[test]
    fn take_keeps_header_bindings() {
        let table = table();
        let (mut buffer, generation) = attached_buffer(&table);
        buffer.press(&table, generation, 0, "");
        buffer.release();
        buffer.take();

        assert_eq!(buffer.attached_generation(), Some(generation));
    }
}
