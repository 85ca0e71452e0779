#[cfg(test)]
mod roster_tests {
    use super::super::*;

    #[test]
    fn seeded_roster_has_five_entries() {
        let roster = Roster::seeded();
        assert_eq!(roster.len(), 5);
        assert_eq!(roster.entries()[0], Entry::new("California", "Los Angeles"));
        assert_eq!(roster.entries()[4], Entry::new("Illinois", "Chicago"));
    }

    #[test]
    fn unique_states_keep_first_occurrence_order() {
        let roster = Roster::seeded();
        assert_eq!(
            roster.unique_states(),
            vec!["California", "Texas", "New York", "Florida", "Illinois"]
        );
    }

    #[test]
    fn add_state_trims_and_appends_placeholder() {
        let mut roster = Roster::seeded();
        roster.add_state("  Nevada  ").unwrap();
        assert_eq!(roster.len(), 6);
        let added = &roster.entries()[5];
        assert_eq!(added.state, "Nevada");
        assert_eq!(added.city, "");
        assert!(!added.has_city());
    }

    #[test]
    fn add_state_preserves_input_casing() {
        let mut roster = Roster::seeded();
        roster.add_state("nevada").unwrap();
        assert_eq!(roster.unique_states().last(), Some(&"nevada"));
    }

    #[test]
    fn add_state_rejects_blank_input() {
        let mut roster = Roster::seeded();
        assert_eq!(
            roster.add_state(""),
            Err(RosterError::EmptyInput(Field::State))
        );
        assert_eq!(
            roster.add_state("   "),
            Err(RosterError::EmptyInput(Field::State))
        );
        assert_eq!(roster.len(), 5);
    }

    #[test]
    fn add_state_rejects_duplicates_ignoring_case() {
        let mut roster = Roster::seeded();
        assert_eq!(roster.add_state("Texas"), Err(RosterError::DuplicateState));
        assert_eq!(roster.add_state("texas"), Err(RosterError::DuplicateState));
        assert_eq!(
            roster.add_state("  TEXAS  "),
            Err(RosterError::DuplicateState)
        );
        assert_eq!(roster.len(), 5);
    }

    #[test]
    fn add_city_requires_a_selection() {
        let mut roster = Roster::seeded();
        let err = roster.add_city("", "Fresno").unwrap_err();
        assert_eq!(err, RosterError::NoStateSelected);
    }

    #[test]
    fn add_city_rejects_blank_input() {
        let mut roster = Roster::seeded();
        let err = roster.add_city("California", "  ").unwrap_err();
        assert_eq!(err, RosterError::EmptyInput(Field::City));
    }

    #[test]
    fn add_city_appends_trimmed_under_selection() {
        let mut roster = Roster::seeded();
        roster.add_city("California", "  Fresno  ").unwrap();
        assert_eq!(roster.entries()[5], Entry::new("California", "Fresno"));
    }

    #[test]
    fn add_city_rejects_duplicates_within_state_ignoring_case() {
        let mut roster = Roster::seeded();
        assert_eq!(
            roster.add_city("California", "los angeles"),
            Err(RosterError::DuplicateCity)
        );
        assert_eq!(
            roster.add_city("california", "LOS ANGELES"),
            Err(RosterError::DuplicateCity)
        );
        assert_eq!(roster.len(), 5);
    }

    #[test]
    fn add_city_allows_same_name_in_another_state() {
        let mut roster = Roster::seeded();
        roster.add_city("Texas", "Los Angeles").unwrap();
        assert_eq!(roster.entries()[5], Entry::new("Texas", "Los Angeles"));
    }

    #[test]
    fn placeholder_state_keeps_one_dropdown_slot() {
        let mut roster = Roster::seeded();
        roster.add_state("Nevada").unwrap();
        roster.add_city("Nevada", "Reno").unwrap();
        // The placeholder row stays; the state is still listed once.
        assert_eq!(roster.len(), 7);
        let nevada_count = roster
            .unique_states()
            .iter()
            .filter(|state| **state == "Nevada")
            .count();
        assert_eq!(nevada_count, 1);
    }

    #[test]
    fn stale_selection_recreates_state_with_its_own_casing() {
        let mut roster = Roster::seeded();
        // A dropdown can keep a value that no longer matches any entry's
        // casing; the city is filed under the selection as given.
        roster.add_city("texas", "Austin").unwrap();
        assert_eq!(roster.entries()[5], Entry::new("texas", "Austin"));
        let states = roster.unique_states();
        assert!(states.contains(&"Texas"));
        assert!(states.contains(&"texas"));
    }

    #[test]
    fn edit_city_applies_trimmed_proposal_in_place() {
        let mut roster = Roster::seeded();
        let outcome = roster.edit_city(1, Some("  San Antonio  ")).unwrap();
        assert_eq!(outcome, CityEdit::Applied);
        assert_eq!(roster.entries()[1], Entry::new("Texas", "San Antonio"));
        assert_eq!(roster.len(), 5);
    }

    #[test]
    fn edit_city_skips_missing_or_blank_proposals() {
        let mut roster = Roster::seeded();
        assert_eq!(roster.edit_city(0, None), Ok(CityEdit::Skipped));
        assert_eq!(roster.edit_city(0, Some("   ")), Ok(CityEdit::Skipped));
        assert_eq!(roster.entries()[0].city, "Los Angeles");
        assert_eq!(roster.len(), 5);
    }

    #[test]
    fn edit_city_rejects_duplicate_within_state() {
        let mut roster = Roster::seeded();
        roster.add_city("Texas", "Dallas").unwrap();
        let err = roster.edit_city(1, Some("dallas")).unwrap_err();
        assert_eq!(err, RosterError::DuplicateCity);
        assert_eq!(roster.entries()[1].city, "Houston");
    }

    #[test]
    fn edit_city_allows_reusing_a_name_from_another_state() {
        let mut roster = Roster::seeded();
        roster.edit_city(1, Some("Miami")).unwrap();
        assert_eq!(roster.entries()[1], Entry::new("Texas", "Miami"));
    }

    #[test]
    fn edit_city_to_itself_is_allowed() {
        let mut roster = Roster::seeded();
        let outcome = roster.edit_city(0, Some("los angeles")).unwrap();
        assert_eq!(outcome, CityEdit::Applied);
        assert_eq!(roster.entries()[0].city, "los angeles");
    }

    #[test]
    fn remove_shifts_following_entries_down() {
        let mut roster = Roster::seeded();
        let removed = roster.remove(0);
        assert_eq!(removed, Entry::new("California", "Los Angeles"));
        assert_eq!(roster.len(), 4);
        assert_eq!(roster.entries()[0].state, "Texas");
    }

    #[test]
    fn removing_a_state_last_entry_drops_it_from_the_dropdown() {
        let mut roster = Roster::seeded();
        roster.remove(1);
        assert!(!roster.unique_states().contains(&"Texas"));
    }

    #[test]
    fn error_messages_match_the_user_facing_text() {
        assert_eq!(
            RosterError::EmptyInput(Field::State).to_string(),
            "State name cannot be empty."
        );
        assert_eq!(
            RosterError::EmptyInput(Field::City).to_string(),
            "City name cannot be empty."
        );
        assert_eq!(
            RosterError::NoStateSelected.to_string(),
            "Please select a state."
        );
        assert_eq!(
            RosterError::DuplicateState.to_string(),
            "This state already exists."
        );
        assert_eq!(
            RosterError::DuplicateCity.to_string(),
            "This city already exists in the selected state."
        );
    }
}
