//! Geometry validation tests
//!
//! Corner occupancy, reframing and path conflicts over the quadrant model.

use yield_or_die::simulation::{
    needed_corners, paths_intersect, relative_position, resulting_position, Corner, Direction,
    RuleError, TurnSignal,
};

use Direction::{Ahead, Behind, Left, Right};

#[test]
fn test_needed_corners_examples() {
    assert_eq!(
        needed_corners(Behind, TurnSignal::NoTurn),
        vec![Corner::NearRight, Corner::FarRight]
    );
    assert_eq!(
        needed_corners(Right, TurnSignal::TurnRight),
        vec![Corner::FarRight]
    );
    assert_eq!(
        needed_corners(Left, TurnSignal::TurnRight),
        vec![Corner::NearLeft]
    );
    assert_eq!(
        needed_corners(Left, TurnSignal::TurnLeft),
        vec![Corner::NearLeft, Corner::NearRight, Corner::FarRight]
    );
}

#[test]
fn test_needed_corners_counts_and_start() {
    for entry in Direction::ALL {
        for turn in TurnSignal::ALL {
            let corners = needed_corners(entry, turn);
            assert_eq!(corners.len(), turn.corner_count());
            assert_eq!(corners[0].index(), entry.index());
        }
    }
}

#[test]
fn test_relative_position_of_self_is_behind() {
    for direction in Direction::ALL {
        assert_eq!(relative_position(direction, direction), Behind);
    }
}

#[test]
fn test_relative_position_table() {
    // (reference, other, expected)
    let table = [
        (Behind, Behind, Behind),
        (Behind, Right, Right),
        (Behind, Ahead, Ahead),
        (Behind, Left, Left),
        (Right, Behind, Left),
        (Right, Right, Behind),
        (Right, Ahead, Right),
        (Right, Left, Ahead),
        (Ahead, Behind, Ahead),
        (Ahead, Right, Left),
        (Ahead, Ahead, Behind),
        (Ahead, Left, Right),
        (Left, Behind, Right),
        (Left, Right, Ahead),
        (Left, Ahead, Left),
        (Left, Left, Behind),
    ];

    for (reference, other, expected) in table {
        assert_eq!(
            relative_position(reference, other),
            expected,
            "relative_position({}, {})",
            reference,
            other
        );
    }
}

#[test]
fn test_relative_position_undoes_rotation() {
    for reference in Direction::ALL {
        for other in Direction::ALL {
            let relative = relative_position(reference, other);
            assert_eq!(resulting_position(reference, relative), other);
        }
    }
}

#[test]
fn test_resulting_position() {
    for offset in Direction::ALL {
        assert_eq!(resulting_position(Behind, offset), offset);
    }

    assert_eq!(resulting_position(Ahead, Behind), Ahead);
    assert_eq!(resulting_position(Ahead, Right), Left);
    assert_eq!(resulting_position(Ahead, Ahead), Behind);
    assert_eq!(resulting_position(Ahead, Left), Right);

    assert_eq!(resulting_position(Right, Right), Ahead);
    assert_eq!(resulting_position(Left, Right), Behind);
}

#[test]
fn test_paths_intersect() {
    assert!(!paths_intersect(TurnSignal::TurnLeft, Left, TurnSignal::TurnRight));
    assert!(paths_intersect(TurnSignal::TurnLeft, Ahead, TurnSignal::TurnRight));

    // Two right turns from opposite roads never meet
    assert!(!paths_intersect(TurnSignal::TurnRight, Ahead, TurnSignal::TurnRight));
    // Crossing traffic from the right always does
    assert!(paths_intersect(TurnSignal::NoTurn, Right, TurnSignal::NoTurn));
}

#[test]
fn test_direction_parsing() {
    assert_eq!("ahead".parse::<Direction>(), Ok(Ahead));
    assert_eq!(Direction::try_from(3), Ok(Left));
    assert_eq!(Ahead.opposite(), Behind);
    assert_eq!(Left.opposite(), Right);

    assert_eq!(
        "up".parse::<Direction>(),
        Err(RuleError::InvalidDirection {
            value: "up".to_string()
        })
    );
    assert!(matches!(
        Direction::try_from(4),
        Err(RuleError::InvalidDirection { .. })
    ));
}

#[test]
fn test_names() {
    assert_eq!(Corner::FarLeft.to_string(), "far-left");
    assert_eq!(TurnSignal::NoTurn.to_string(), "no-turn");
    assert_eq!(format!("[{:<6}]", Left), "[left  ]");
}
