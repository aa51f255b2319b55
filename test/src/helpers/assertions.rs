/// Assert that a portal exists and is bound to a live source
#[macro_export]
macro_rules! assert_portal_bound {
    ($engine:expr, $portal:expr) => {
        let portal = $engine
            .portals()
            .get(&$portal)
            .unwrap_or_else(|| panic!("Portal {} should exist", $portal));
        assert!(
            !portal.is_orphan(),
            "Portal {} should be bound, orphaned with: {:?}",
            $portal,
            portal.orphan_reason()
        );
        assert!(
            $engine.properties().contains(&portal.source_id()),
            "Source of portal {} should be a registered property",
            $portal
        );
    };
}

/// Assert that a pin is reported orphaned with a reason starting with the
/// given prefix
#[macro_export]
macro_rules! assert_pin_orphaned {
    ($engine:expr, $pin:expr, $prefix:expr) => {
        let reason = $engine
            .orphan_reason(&$pin)
            .unwrap_or_else(|| panic!("Pin {} should be orphaned", $pin));
        assert!(
            reason.starts_with($prefix),
            "Pin {} orphaned with unexpected reason: {}",
            $pin,
            reason
        );
    };
}

/// Assert that a live field holds exactly the given storage bytes
#[macro_export]
macro_rules! assert_field_eq {
    ($scene:expr, $object:expr, $path:expr, $expected:expr) => {
        assert_eq!(
            $scene.field_value($object, $path),
            Some($expected),
            "Field {} of {:?} holds an unexpected value",
            $path,
            $object
        );
    };
}
