//! Integration tests for motion-log reading

mod common;

use common::*;
use pattern_ingest::io::motion::{CONSTRUCTION_REFERENCE, EXPOSURE_REFERENCE};
use pattern_ingest::{
    open_reader, IngestError, MotionLogReader, NotificationType, Pattern, PolylineReader,
    ReaderOptions,
};
use proptest::prelude::*;

const SEGMENTED: &str =
    "MoveAbsolute(1,1); MoveAbsolute(2,2); SetTrigger(off); MoveAbsolute(3,3); SetTrigger(off);";

const CONSTRUCTION_FIRST: &str =
    "MoveAbsolute(1,1); MoveAbsolute(2,2); SetTrigger(on); MoveAbsolute(3,3); SetTrigger(off);";

fn paths(pattern: &Pattern) -> Vec<Vec<(f64, f64)>> {
    pattern.polylines().map(coords).collect()
}

#[test]
fn test_trigger_segmentation() {
    let pattern = read_motion_log(SEGMENTED, false);
    assert_eq!(
        paths(&pattern),
        vec![
            vec![(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)],
            vec![(2.0, 2.0), (3.0, 3.0)],
        ]
    );
    assert_eq!(references(&pattern), vec![EXPOSURE_REFERENCE; 2]);
    assert!(pattern.polylines().all(|p| !p.closed && p.dose().is_none()));
}

#[test]
fn test_construction_lines_excluded() {
    let mut reader = motion_reader(CONSTRUCTION_FIRST, false);
    let pattern = reader.read_pattern().unwrap();

    // Only the exposed path after the construction move remains
    assert_eq!(paths(&pattern), vec![vec![(2.0, 2.0), (3.0, 3.0)]]);
    assert!(pattern.with_reference(CONSTRUCTION_REFERENCE).next().is_none());
    assert!(reader.notifications().has_type(NotificationType::Discarded));
}

#[test]
fn test_construction_lines_included() {
    let pattern = read_motion_log(CONSTRUCTION_FIRST, true);
    assert_eq!(
        references(&pattern),
        vec![CONSTRUCTION_REFERENCE, EXPOSURE_REFERENCE]
    );
    assert_eq!(
        coords(pattern.get(0).unwrap()),
        vec![(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)]
    );
}

#[test]
fn test_commented_multiline_log() {
    let log = "/* calibration run\n\
               written by the stage controller */\n\
               ms(200); /* speed */ wsp();\n\
               MoveAbsoluteSamplePos(100,\n\
               \t50);\n\
               mr(0, 0, 0); mr(5 /* x */, 0, 0); st(off);\n\
               DisplayMessage(done, really);\n";
    let mut reader = motion_reader(log, false);
    let pattern = reader.read_pattern().unwrap();

    assert_eq!(
        paths(&pattern),
        vec![vec![(0.0, 0.0), (100.0, 50.0), (100.0, 50.0), (105.0, 50.0)]]
    );
    assert!(reader.notifications().is_empty());
}

#[test]
fn test_unknown_function_reports_line() {
    let result = motion_reader("ma(1,1,0);\nteleport(3);\n", false).read_pattern();
    assert!(matches!(result, Err(IngestError::Parse { line: 2, .. })));
}

#[test]
fn test_invalid_trigger_literal() {
    for log in ["st(onoff);", "st(maybe);", "st(on off);"] {
        let result = motion_reader(log, false).read_pattern();
        assert!(
            matches!(result, Err(IngestError::Parse { .. })),
            "{log} should fail"
        );
    }
}

#[test]
fn test_error_leaves_pattern_untouched() {
    let mut pattern = read_motion_log("ma(1,1,0); st(off);", false);
    let result = motion_reader("ma(2,2,0); st(off); ma(x,1,0);", false).append_to(&mut pattern);
    assert!(result.is_err());
    assert_eq!(pattern.len(), 1);
}

#[test]
fn test_read_after_parse_error_returns_none() {
    let mut reader = motion_reader("ma(1,1,0); ma(x,1,0); ma(2,2,0); st(off);", false);
    assert!(matches!(reader.read_polyline(), Err(IngestError::Parse { .. })));
    assert!(reader.read_polyline().unwrap().is_none());
    assert!(reader.notifications().is_empty());
}

#[test]
fn test_trailing_untriggered_path() {
    let mut reader = motion_reader("ma(1,1,0); st(off); ma(4,4,0); mr(1,0,0);", false);
    let pattern = reader.read_pattern().unwrap();
    assert_eq!(pattern.len(), 1);
    assert_eq!(
        reader
            .notifications()
            .of_type(NotificationType::Discarded)
            .len(),
        1
    );
}

#[test]
fn test_open_reader_picks_motion_log() {
    let file = temp_input(SEGMENTED, ".gwl");
    let options = ReaderOptions::default();

    let mut reader = open_reader(file.path(), &options).unwrap();
    let pattern = reader.read_pattern().unwrap();
    assert_eq!(pattern.len(), 2);
    reader.close().unwrap();
    reader.close().unwrap();
}

#[test]
fn test_from_file_resumes_between_calls() {
    let file = temp_input(SEGMENTED, ".log");
    let mut reader = MotionLogReader::from_file(file.path()).unwrap();

    assert_eq!(reader.read_polyline().unwrap().unwrap().len(), 3);
    assert_eq!(reader.position().x, 2.0);
    assert_eq!(reader.read_polyline().unwrap().unwrap().len(), 2);
    assert!(reader.read_polyline().unwrap().is_none());
    assert!(reader.read_polyline().unwrap().is_none());
}

/// Comment text: anything except the comment delimiters
fn comment() -> impl Strategy<Value = String> {
    "[a-z0-9 ;(),]{0,12}".prop_map(|body| format!("/*{}*/", body))
}

proptest! {
    /// Comments never change what a log draws
    #[test]
    fn prop_comments_are_transparent(
        moves in prop::collection::vec(((-50i32..50), (-50i32..50), any::<bool>()), 1..12),
        comments in prop::collection::vec(comment(), 24),
    ) {
        let mut clean = String::new();
        let mut commented = String::new();

        for (i, &(x, y, trigger)) in moves.iter().enumerate() {
            clean.push_str(&format!("mr({}, {}, 0);", x, y));
            commented.push_str(&format!(
                "{}mr({},{} {}, 0);",
                comments[i % comments.len()],
                x,
                comments[(i + 1) % comments.len()],
                y
            ));
            if trigger {
                clean.push_str(" st(off);\n");
                commented.push_str(&format!(" st({}off);\n", comments[(i + 2) % comments.len()]));
            }
        }
        clean.push_str("st(off);\n");
        commented.push_str("st(off);\n");

        let expected = paths(&read_motion_log(&clean, false));
        let actual = paths(&read_motion_log(&commented, false));
        prop_assert_eq!(actual, expected);
    }
}
