use chrono::{NaiveDate, NaiveTime};
use rusqlite::Connection;
use themebook_core::db::open_db_in_memory;
use themebook_core::{
    CreateReservationRequest, CreateThemeRequest, FixedClock, ReservationService,
    SqliteReservationRepository, SqliteThemeRepository, ThemeId, ThemePatch, ThemeService,
    ThemeServiceError, ThemeValidationError, ValidationError,
};

fn theme_service(
    conn: &Connection,
) -> ThemeService<SqliteThemeRepository<'_>, SqliteReservationRepository<'_>> {
    ThemeService::new(
        SqliteThemeRepository::try_new(conn).unwrap(),
        SqliteReservationRepository::try_new(conn).unwrap(),
    )
}

fn create_request(name: &str, price: i64) -> CreateThemeRequest {
    CreateThemeRequest {
        name: name.to_string(),
        description: "escape room".to_string(),
        price,
    }
}

fn book(conn: &Connection, theme_id: ThemeId, hour: u32) -> i64 {
    let now = NaiveDate::from_ymd_opt(2023, 1, 1)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap();
    let service = ReservationService::with_clock(
        SqliteReservationRepository::try_new(conn).unwrap(),
        SqliteThemeRepository::try_new(conn).unwrap(),
        FixedClock(now),
    );
    service
        .create_reservation(&CreateReservationRequest::new(
            NaiveDate::from_ymd_opt(2023, 10, 23).unwrap(),
            NaiveTime::from_hms_opt(hour, 0, 0).unwrap(),
            "baker",
            theme_id,
        ))
        .unwrap()
}

fn cancel(conn: &Connection, reservation_id: i64) {
    ReservationService::new(
        SqliteReservationRepository::try_new(conn).unwrap(),
        SqliteThemeRepository::try_new(conn).unwrap(),
    )
    .cancel_reservation(reservation_id)
    .unwrap();
}

#[test]
fn create_list_and_get_themes() {
    let conn = open_db_in_memory().unwrap();
    let service = theme_service(&conn);

    let first = service.create_theme(&create_request("Mystery Room", 29_000)).unwrap();
    let second = service.create_theme(&create_request("Haunted Library", 0)).unwrap();

    let listed = service.list_themes().unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].id, Some(first));
    assert_eq!(listed[1].id, Some(second));

    let loaded = service.get_theme(second).unwrap();
    assert_eq!(loaded.name, "Haunted Library");
    assert_eq!(loaded.price, 0);

    assert!(matches!(
        service.get_theme(999).unwrap_err(),
        ThemeServiceError::ThemeNotFound(999)
    ));
}

#[test]
fn duplicate_name_is_rejected_and_match_is_case_sensitive() {
    let conn = open_db_in_memory().unwrap();
    let service = theme_service(&conn);
    service.create_theme(&create_request("Mystery Room", 29_000)).unwrap();

    let err = service
        .create_theme(&create_request("Mystery Room", 31_000))
        .unwrap_err();
    assert!(matches!(
        err,
        ThemeServiceError::Validation(ValidationError::DuplicateTheme { ref name })
            if name == "Mystery Room"
    ));

    service.create_theme(&create_request("mystery room", 31_000)).unwrap();
}

#[test]
fn invalid_fields_are_rejected_before_storage() {
    let conn = open_db_in_memory().unwrap();
    let service = theme_service(&conn);

    assert!(matches!(
        service.create_theme(&create_request("  ", 1000)).unwrap_err(),
        ThemeServiceError::InvalidTheme(ThemeValidationError::BlankName)
    ));
    assert!(matches!(
        service.create_theme(&create_request("Mystery Room", -5)).unwrap_err(),
        ThemeServiceError::InvalidTheme(ThemeValidationError::NegativePrice(-5))
    ));
    assert!(service.list_themes().unwrap().is_empty());
}

#[test]
fn referenced_theme_cannot_be_deleted_until_reservations_are_cancelled() {
    let conn = open_db_in_memory().unwrap();
    let theme_id = theme_service(&conn)
        .create_theme(&create_request("Mystery Room", 29_000))
        .unwrap();
    let reservation_id = book(&conn, theme_id, 13);

    let service = theme_service(&conn);
    assert!(matches!(
        service.delete_theme(theme_id).unwrap_err(),
        ThemeServiceError::Validation(ValidationError::ThemeInUse)
    ));

    cancel(&conn, reservation_id);
    service.delete_theme(theme_id).unwrap();
    assert!(matches!(
        service.delete_theme(theme_id).unwrap_err(),
        ThemeServiceError::ThemeNotFound(_)
    ));
}

#[test]
fn update_applies_only_present_fields() {
    let conn = open_db_in_memory().unwrap();
    let service = theme_service(&conn);
    let theme_id = service.create_theme(&create_request("Mystery Room", 29_000)).unwrap();

    let updated = service
        .update_theme(
            theme_id,
            &ThemePatch {
                price: Some(31_000),
                ..ThemePatch::default()
            },
        )
        .unwrap();
    assert_eq!(updated.name, "Mystery Room");
    assert_eq!(updated.description, "escape room");
    assert_eq!(updated.price, 31_000);

    let renamed = service
        .update_theme(
            theme_id,
            &ThemePatch {
                name: Some("Mystery Room 2".to_string()),
                description: Some("sequel".to_string()),
                price: None,
            },
        )
        .unwrap();
    assert_eq!(renamed.name, "Mystery Room 2");
    assert_eq!(renamed.description, "sequel");
    assert_eq!(renamed.price, 31_000);
}

#[test]
fn update_rejects_empty_patch_rename_collision_and_in_use_theme() {
    let conn = open_db_in_memory().unwrap();
    let service = theme_service(&conn);
    let theme_id = service.create_theme(&create_request("Mystery Room", 29_000)).unwrap();
    service.create_theme(&create_request("Haunted Library", 25_000)).unwrap();

    assert!(matches!(
        service.update_theme(theme_id, &ThemePatch::default()).unwrap_err(),
        ThemeServiceError::EmptyPatch
    ));

    let collision = ThemePatch {
        name: Some("Haunted Library".to_string()),
        ..ThemePatch::default()
    };
    assert!(matches!(
        service.update_theme(theme_id, &collision).unwrap_err(),
        ThemeServiceError::Validation(ValidationError::DuplicateTheme { .. })
    ));

    let same_name = ThemePatch {
        name: Some("Mystery Room".to_string()),
        ..ThemePatch::default()
    };
    service.update_theme(theme_id, &same_name).unwrap();

    book(&conn, theme_id, 15);
    let price_change = ThemePatch {
        price: Some(1),
        ..ThemePatch::default()
    };
    assert!(matches!(
        service.update_theme(theme_id, &price_change).unwrap_err(),
        ThemeServiceError::Validation(ValidationError::ThemeInUse)
    ));
}

#[test]
fn reservation_keeps_theme_snapshot_when_catalog_row_changes() {
    let conn = open_db_in_memory().unwrap();
    let theme_id = theme_service(&conn)
        .create_theme(&create_request("Mystery Room", 29_000))
        .unwrap();
    let reservation_id = book(&conn, theme_id, 13);

    let rename = ThemePatch {
        name: Some("Renamed".to_string()),
        ..ThemePatch::default()
    };
    assert!(matches!(
        theme_service(&conn).update_theme(theme_id, &rename).unwrap_err(),
        ThemeServiceError::Validation(ValidationError::ThemeInUse)
    ));

    // ThemeService refuses to edit a booked theme, so change the row directly.
    conn.execute(
        "UPDATE themes SET name = 'Renamed', price = 35000 WHERE id = ?1;",
        [theme_id],
    )
    .unwrap();

    let stored = ReservationService::new(
        SqliteReservationRepository::try_new(&conn).unwrap(),
        SqliteThemeRepository::try_new(&conn).unwrap(),
    )
    .get_reservation(reservation_id)
    .unwrap();
    assert_eq!(stored.theme_id, theme_id);
    assert_eq!(stored.theme.name, "Mystery Room");
    assert_eq!(stored.theme.price, 29_000);
}
