use gazetteer::page::{PAGE_ROWS, Pager};
use gazetteer::roster::{CityEdit, Roster, RosterError};

#[test]
fn a_session_grows_pages_as_the_roster_grows() {
    let mut roster = Roster::seeded();
    let mut pager = Pager::default();
    assert_eq!(roster.len(), PAGE_ROWS);
    assert_eq!(Pager::total_pages(roster.len()), 1);
    assert!(!pager.next(roster.len()));

    roster.add_state("nevada").unwrap();
    assert_eq!(roster.len(), 6);
    assert_eq!(Pager::total_pages(roster.len()), 2);
    assert_eq!(roster.unique_states().last().copied(), Some("nevada"));

    assert!(pager.next(roster.len()));
    assert_eq!(pager.page(), 2);
    assert_eq!(pager.window(roster.entries()).len(), 1);
    assert_eq!(pager.window(roster.entries())[0].state, "nevada");
    assert!(!pager.window(roster.entries())[0].has_city());

    assert_eq!(
        roster.add_state("  NEVADA  "),
        Err(RosterError::DuplicateState)
    );

    roster.add_city("nevada", "Reno").unwrap();
    assert_eq!(roster.len(), 7);
    assert_eq!(
        roster.add_city("nevada", "reno"),
        Err(RosterError::DuplicateCity)
    );
    // the placeholder row and the new city share one dropdown slot
    assert_eq!(roster.unique_states().len(), 6);
}

#[test]
fn deleting_from_the_last_page_leaves_a_stale_page_until_prev() {
    let mut roster = Roster::seeded();
    roster.add_city("Texas", "Austin").unwrap();
    assert_eq!(roster.len(), 6);

    let mut pager = Pager::default();
    assert!(pager.next(roster.len()));
    assert_eq!(pager.window(roster.entries()).len(), 1);

    let removed = roster.remove(5);
    assert_eq!(removed.city, "Austin");

    // the pager stays on the now-empty page until the user steps back
    assert_eq!(pager.page(), 2);
    assert!(pager.window(roster.entries()).is_empty());
    assert_eq!(Pager::total_pages(roster.len()), 1);

    assert!(pager.prev());
    assert_eq!(pager.page(), 1);
    assert_eq!(pager.window(roster.entries()).len(), PAGE_ROWS);
}

#[test]
fn renaming_and_removing_cities_keeps_order_stable() {
    let mut roster = Roster::seeded();
    assert_eq!(
        roster.edit_city(0, Some("San Diego")).unwrap(),
        CityEdit::Applied
    );
    assert_eq!(roster.entries()[0].city, "San Diego");
    assert_eq!(roster.edit_city(0, Some("   ")).unwrap(), CityEdit::Skipped);
    assert_eq!(roster.entries()[0].city, "San Diego");

    roster.add_city("California", "Los Angeles").unwrap();
    assert_eq!(
        roster.edit_city(0, Some("los angeles")),
        Err(RosterError::DuplicateCity)
    );

    let removed = roster.remove(0);
    assert_eq!(removed.state, "California");
    assert_eq!(roster.entries()[0].state, "Texas");
    assert_eq!(roster.len(), 5);
}
