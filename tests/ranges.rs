use reddit_comments::{
    convert_timestamp, enumerate_filenames, monthly_filename, months_in_range, normalize_date_range,
    normalize_score_range, ArchiveFormat, DateRange, YearMonth, MAX_DATE, MAX_SCORE, MIN_DATE, MIN_SCORE,
};
use serde_json::json;

const BZ2: ArchiveFormat = ArchiveFormat::Bz2;

fn ym(year: u16, month: u8) -> YearMonth {
    YearMonth { year, month }
}

/// Inclusive start, exclusive end, with the December → January rollover.
#[test]
fn enumerate_rolls_over_year_boundary() {
    let range = DateRange::new(Some("2007-11"), Some("2008-02"));
    assert_eq!(
        enumerate_filenames(&range, BZ2).unwrap(),
        vec!["2007/RC_2007-11.bz2", "2007/RC_2007-12.bz2", "2008/RC_2008-01.bz2"]
    );
}

/// `YYYY-MM-DD` ends resolve to their containing month, which is excluded
/// whatever the day.
#[test]
fn enumerate_accepts_full_dates() {
    let first_of_month = DateRange::new(Some("2007-11-20"), Some("2008-01-01"));
    assert_eq!(
        enumerate_filenames(&first_of_month, BZ2).unwrap(),
        vec!["2007/RC_2007-11.bz2", "2007/RC_2007-12.bz2"]
    );

    let mid_month = DateRange::new(Some("2007-11-20"), Some("2008-01-15"));
    assert_eq!(
        enumerate_filenames(&mid_month, BZ2).unwrap(),
        vec!["2007/RC_2007-11.bz2", "2007/RC_2007-12.bz2"]
    );

    let within_one_month = DateRange::new(Some("2007-12-05"), Some("2007-12-20"));
    assert!(enumerate_filenames(&within_one_month, BZ2).unwrap().is_empty());
}

/// The default range covers October 2007 through May 2015.
#[test]
fn full_range_covers_the_archive() {
    let months = months_in_range(&DateRange::full()).unwrap();
    assert_eq!(months.len(), 92);
    assert_eq!(months.first(), Some(&ym(2007, 10)));
    assert_eq!(months.last(), Some(&ym(2015, 5)));
    assert!(months.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn empty_or_reversed_ranges_enumerate_nothing() {
    let same = DateRange::new(Some("2010-05"), Some("2010-05"));
    assert!(enumerate_filenames(&same, BZ2).unwrap().is_empty());

    let reversed = DateRange::new(Some("2011-01"), Some("2010-01"));
    assert!(enumerate_filenames(&reversed, BZ2).unwrap().is_empty());
}

#[test]
fn enumerate_rejects_unparsable_dates() {
    for bad in ["2007", "2007-13", "2007-02-30", "07-10", "2007-10-01T00:00:00", "abcd-ef"] {
        let range = DateRange::new(Some(bad), Some("2008-01"));
        let err = enumerate_filenames(&range, BZ2).unwrap_err();
        assert!(err.is_invalid_argument(), "{bad}: {err}");
    }
}

#[test]
fn monthly_filename_forms() {
    assert_eq!(monthly_filename("2015-05", BZ2).unwrap(), "2015/RC_2015-05.bz2");
    assert_eq!(monthly_filename("2009-03-17", BZ2).unwrap(), "2009/RC_2009-03.bz2");
    assert_eq!(monthly_filename("2009-3", ArchiveFormat::Zst).unwrap(), "2009/RC_2009-03.zst");
    assert!(monthly_filename("March 2009", BZ2).is_err());
    assert_eq!(ym(2012, 12).filename(ArchiveFormat::Jsonl), "2012/RC_2012-12.jsonl");
}

#[test]
fn date_range_defaults_fill_open_ends() {
    let both = normalize_date_range([None::<&str>, None]).unwrap();
    assert_eq!((both.start(), both.end()), (MIN_DATE, MAX_DATE));
    assert_eq!((both.start(), both.end()), ("2007-10-01", "2015-06-01"));

    let start_only = normalize_date_range([Some("2010-01-01"), None]).unwrap();
    assert_eq!((start_only.start(), start_only.end()), ("2010-01-01", "2015-06-01"));

    let empty_start = normalize_date_range([Some(""), Some("2008-01")]).unwrap();
    assert_eq!((empty_start.start(), empty_start.end()), ("2007-10-01", "2008-01"));

    // blank counts as unset; given bounds are stored trimmed
    let padded = normalize_date_range([Some(" 2010-01 "), Some("   ")]).unwrap();
    assert_eq!((padded.start(), padded.end()), ("2010-01", "2015-06-01"));
    assert!(padded.contains("2010-01-01T00:00:00"));

    // no format validation at this stage
    let odd = normalize_date_range([Some("whenever"), Some("later")]).unwrap();
    assert_eq!(odd.start(), "whenever");
}

#[test]
fn date_range_requires_two_items() {
    assert!(normalize_date_range([Some("2010-01")]).unwrap_err().is_invalid_argument());
    assert!(normalize_date_range(Vec::<Option<&str>>::new()).unwrap_err().is_invalid_argument());
    assert!(normalize_date_range([Some("a"), Some("b"), Some("c")]).unwrap_err().is_invalid_argument());
}

#[test]
fn score_range_defaults_and_shape() {
    let r = normalize_score_range([None, Some(100)]).unwrap();
    assert_eq!((r.min, r.max), (-2147483647, 100));

    let r = normalize_score_range([Some(5), None]).unwrap();
    assert_eq!((r.min, r.max), (5, MAX_SCORE));
    assert_eq!(MIN_SCORE, -2_147_483_647);

    // zero on either side means "unset"
    let r = normalize_score_range([Some(0), Some(10)]).unwrap();
    assert_eq!((r.min, r.max), (MIN_SCORE, 10));
    assert!(r.contains(-3));
    let r = normalize_score_range([Some(-5), Some(0)]).unwrap();
    assert_eq!((r.min, r.max), (-5, MAX_SCORE));
    assert!(r.contains(0));
    assert!(!r.contains(-6));

    let r = normalize_score_range([Some(1), Some(2)]).unwrap();
    assert!(r.contains(1));
    assert!(!r.contains(2));

    assert!(normalize_score_range([Some(1), Some(2), Some(3)]).unwrap_err().is_invalid_argument());
}

/// Record timestamps compare as strings against the bounds.
#[test]
fn date_range_contains_is_string_ordered() {
    let r = DateRange::new(Some("2015-01-01"), Some("2015-01-02"));
    assert!(r.contains("2015-01-01T00:00:00"));
    assert!(r.contains("2015-01-01T23:59:59"));
    assert!(!r.contains("2015-01-02T00:00:00"));
    assert!(!r.contains("2014-12-31T23:59:59"));
    assert!(!r.contains(""));
}

#[test]
fn timestamps_convert_or_become_empty() {
    assert_eq!(convert_timestamp(Some(&json!(1192449600))), "2007-10-15T12:00:00");
    assert_eq!(convert_timestamp(Some(&json!("1192449600"))), "2007-10-15T12:00:00");
    assert_eq!(convert_timestamp(Some(&json!(1192449600.75))), "2007-10-15T12:00:00");
    assert_eq!(convert_timestamp(Some(&json!(0))), "1970-01-01T00:00:00");
    assert_eq!(convert_timestamp(Some(&json!("soon"))), "");
    assert_eq!(convert_timestamp(Some(&json!(null))), "");
    assert_eq!(convert_timestamp(Some(&json!(false))), "");
    assert_eq!(convert_timestamp(None), "");
}

#[test]
fn year_month_next_and_display() {
    assert_eq!(ym(2007, 12).next(), Some(ym(2008, 1)));
    assert_eq!(ym(2007, 3).to_string(), "2007-03");
    assert_eq!("2014-07-04".parse::<YearMonth>().unwrap(), ym(2014, 7));
}
