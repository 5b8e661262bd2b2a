use super::*;
use crate::error::CorTiltError;
use crate::types::{Degrees, ScalarCor, SlicePoint};
use approx::assert_abs_diff_eq;

fn sample_set(points: &[(usize, f64)]) -> SampleSet {
    let mut set = SampleSet::new();
    for &(slice, cor) in points {
        set.add_point(None, SlicePoint::new(slice, cor));
    }
    set
}

fn assert_aligned(set: &SampleSet) {
    assert_eq!(set.num_points(), set.slices().len());
    assert_eq!(set.num_points(), set.cors().len());
    assert_eq!(set.empty(), set.num_points() == 0);
}

#[test]
fn new_set_is_empty() {
    let set = SampleSet::new();
    assert!(set.empty());
    assert_eq!(set.num_points(), 0);
    assert!(set.slices().is_empty());
    assert!(set.cors().is_empty());
    assert!(!set.has_results());
}

#[test]
fn add_point_overwrites_by_position() {
    let mut set = SampleSet::new();
    set.add_point(Some(0), SlicePoint::default());
    assert_aligned(&set);
    set.add_point(Some(0), SlicePoint::new(20, 5.0));
    assert_aligned(&set);
    set.add_point(Some(1), SlicePoint::new(60, 7.8));
    assert_aligned(&set);
    set.add_point(Some(7), SlicePoint::new(90, 1.5));
    assert_aligned(&set);

    assert_eq!(set.slices(), &[20, 60, 90]);
    assert_eq!(set.cors(), &[5.0, 7.8, 1.5]);
}

#[test]
fn add_point_overwrite_ignores_stored_slice_value() {
    let mut set = sample_set(&[(10, 1.0), (20, 2.0)]);
    set.add_point(Some(1), SlicePoint::new(10, 9.0));
    assert_eq!(set.slices(), &[10, 10]);
    assert_eq!(set.cors(), &[1.0, 9.0]);
}

#[test]
fn add_points_without_index_append() {
    let set = sample_set(&[(0, 0.0), (20, 5.0), (60, 7.8)]);
    assert!(!set.empty());
    assert_eq!(set.num_points(), 3);
    assert_eq!(set.slices(), &[0, 20, 60]);
    assert_eq!(set.cors(), &[0.0, 5.0, 7.8]);
}

#[test]
fn insert_and_remove_shift_positions() {
    let mut set = sample_set(&[(10, 1.0), (30, 3.0)]);
    set.insert_point(1, SlicePoint::new(20, 2.0));
    set.insert_point(99, SlicePoint::new(40, 4.0));
    assert_eq!(set.slices(), &[10, 20, 30, 40]);

    let removed = set.remove_point(0).expect("index 0 exists");
    assert_eq!(removed, SlicePoint::new(10, 1.0));
    assert_eq!(set.slices(), &[20, 30, 40]);
    assert_eq!(set.cors(), &[2.0, 3.0, 4.0]);
    assert!(set.remove_point(3).is_none());
    assert_aligned(&set);
}

#[test]
fn clear_points_drops_points_and_fit() {
    let mut set = sample_set(&[(0, 5.0), (10, 6.0)]);
    set.linear_regression().expect("two distinct slices fit");
    set.clear_points();
    assert!(set.empty());
    assert!(!set.has_results());
    assert_aligned(&set);
}

#[test]
fn populate_slice_indices_without_cor() {
    let mut set = sample_set(&[(1, 1.0)]);
    set.populate_slice_indices(300, 400, 20, 0.0);
    assert_eq!(set.num_points(), 20);
    assert_eq!(set.point(0).map(|p| p.slice), Some(300));
    assert_eq!(set.point(19).map(|p| p.slice), Some(400));
    assert!(set.cors().iter().all(|&c| c == 0.0));
}

#[test]
fn populate_slice_indices_with_cor() {
    let mut set = SampleSet::new();
    set.populate_slice_indices(300, 400, 20, 56.7);
    assert_eq!(set.num_points(), 20);
    assert_eq!(set.point(0).map(|p| p.slice), Some(300));
    assert_eq!(set.point(19).map(|p| p.slice), Some(400));
    assert!(set.cors().iter().all(|&c| c == 56.7));
}

#[test]
fn regression_without_points_fails() {
    let mut set = SampleSet::new();
    assert_eq!(set.linear_regression(), Err(CorTiltError::EmptyData));
    assert!(!set.has_results());
}

#[test]
fn regression_on_identical_slices_is_degenerate() {
    let mut set = sample_set(&[(12, 5.0), (12, 6.0)]);
    assert_eq!(
        set.linear_regression(),
        Err(CorTiltError::DegenerateData { slice: 12 })
    );
    assert!(!set.has_results());
}

#[test]
fn regression_on_exact_line() {
    let mut set = sample_set(&[(0, 5.0), (10, 6.0), (20, 7.0), (30, 8.0)]);
    let fit = set.linear_regression().expect("fit succeeds");
    assert!(set.has_results());
    assert_eq!(fit.m, 0.1);
    assert_eq!(fit.c, 5.0);
    assert_eq!(set.m(), Some(0.1));
    assert_eq!(set.c(), Some(5.0));
}

#[test]
fn regression_on_measured_data() {
    let points: &[(usize, f64)] = &[
        (1409, 1401.0),
        (1386, 1400.0),
        (1363, 1400.0),
        (1340, 1401.0),
        (1317, 1400.0),
        (1294, 1399.0),
        (1271, 1398.0),
        (1248, 1400.0),
        (1225, 1398.0),
        (1202, 1400.0),
        (1179, 1399.0),
        (1156, 1399.0),
        (1133, 1400.0),
        (1110, 1402.0),
        (1087, 1398.0),
        (1064, 1398.0),
        (1041, 1397.0),
        (1018, 1399.0),
        (995, 1398.0),
        (972, 1401.0),
        (949, 1397.0),
        (926, 1398.0),
        (903, 1398.0),
        (880, 1398.0),
        (857, 1396.0),
        (834, 1397.0),
    ];
    let mut set = sample_set(points);
    let fit = set.linear_regression().expect("fit succeeds");
    assert_abs_diff_eq!(fit.m, 0.005292, epsilon = 1e-6);
    assert_abs_diff_eq!(fit.c, 1392.99, epsilon = 1e-2);
}

#[test]
fn sort_then_fit() {
    let mut set = sample_set(&[(30, 7.0), (10, 5.0), (40, 8.0), (20, 6.0)]);
    set.sort_points();
    assert_eq!(set.slices(), &[10, 20, 30, 40]);
    assert_eq!(set.cors(), &[5.0, 6.0, 7.0, 8.0]);

    let fit = set.linear_regression().expect("fit succeeds");
    assert_abs_diff_eq!(fit.m, 0.1, epsilon = 1e-12);
    assert_abs_diff_eq!(fit.c, 4.0, epsilon = 1e-12);
}

#[test]
fn sort_is_stable_for_repeated_slices() {
    let mut set = sample_set(&[(20, 2.0), (10, 1.0), (20, 3.0), (10, 0.5)]);
    set.sort_points();
    assert_eq!(set.slices(), &[10, 10, 20, 20]);
    assert_eq!(set.cors(), &[1.0, 0.5, 2.0, 3.0]);
}

#[test]
fn clear_results_keeps_points() {
    let mut set = sample_set(&[(0, 5.0), (10, 6.0), (20, 7.0), (30, 8.0)]);
    set.linear_regression().expect("fit succeeds");
    set.clear_results();
    assert!(!set.has_results());
    assert_eq!(set.num_points(), 4);
}

#[test]
fn get_cor_for_slice_matches_stored_value() {
    let set = sample_set(&[(10, 5.0), (20, 6.0), (30, 7.0), (40, 8.0)]);
    assert_eq!(set.get_cor_for_slice(10), Some(5.0));
    assert_eq!(set.get_cor_for_slice(30), Some(7.0));
    assert_eq!(set.get_cor_for_slice(45), None);
    assert_eq!(set.index_for_slice(10), Some(0));
    assert_eq!(set.index_for_slice(100), None);
}

#[test]
fn cor_from_regression() {
    let mut set = sample_set(&[(10, 5.0), (20, 6.0), (30, 7.0), (40, 8.0)]);
    assert_eq!(
        set.get_cor_for_slice_from_regression(0),
        Err(CorTiltError::InvalidState {
            operation: "get_cor_for_slice_from_regression"
        })
    );
    set.linear_regression().expect("fit succeeds");
    assert_eq!(set.get_cor_for_slice_from_regression(0), Ok(4.0));
    assert_eq!(set.get_cor_for_slice_from_regression(10), Ok(5.0));
    assert_eq!(set.get_cor_for_slice_from_regression(50), Ok(9.0));
}

#[test]
fn all_cors_from_regression_has_one_value_per_row() {
    let mut set = sample_set(&[(10, 5.0), (20, 6.0), (30, 7.0), (40, 8.0)]);
    set.linear_regression().expect("fit succeeds");
    let table = set.get_all_cors_from_regression(6).expect("fit present");
    assert_eq!(table.len(), 6);
    for (row, cor) in table.iter().enumerate() {
        assert_abs_diff_eq!(*cor, 0.1 * row as f64 + 4.0, epsilon = 1e-12);
    }
}

#[test]
fn set_cor_at_slice_updates_matching_point() {
    let mut set = sample_set(&[(10, 5.0), (20, 6.0), (30, 7.0), (40, 8.0)]);
    assert!(set.set_cor_at_slice(30, 15.0));
    assert_eq!(set.cors(), &[5.0, 6.0, 15.0, 8.0]);
    assert!(!set.set_cor_at_slice(35, 1.0));
    assert_eq!(set.cors(), &[5.0, 6.0, 15.0, 8.0]);
}

#[test]
fn snapshot_carries_fit_and_samples() {
    let mut set = sample_set(&[(0, 5.0), (10, 6.0), (20, 7.0), (30, 8.0)]);
    assert!(set.properties_snapshot().is_none());
    set.linear_regression().expect("fit succeeds");

    let snap = set.properties_snapshot().expect("fit present");
    assert_eq!(snap.fitted_gradient, 0.1);
    assert_eq!(snap.rotation_centre, 5.0);
    assert_eq!(snap.slice_indices, vec![0, 10, 20, 30]);
    assert_eq!(snap.rotation_centres, vec![5.0, 6.0, 7.0, 8.0]);
    assert_abs_diff_eq!(snap.tilt_angle_rad, 0.1f64.atan());

    let value = snap.to_value();
    let fields = value.as_object().expect("snapshot serializes to an object");
    assert_eq!(fields.len(), 5);
    assert!(fields["tilt_angle_rad"].is_f64());
}

#[test]
fn precalculated_fit_drives_regression_lookups() {
    let mut set = SampleSet::new();
    set.set_precalculated(ScalarCor(100.0), Degrees(45.0));
    assert!(set.has_results());
    assert_abs_diff_eq!(set.m().unwrap_or_default(), 1.0, epsilon = 1e-12);
    let cor = set.get_cor_for_slice_from_regression(10).expect("fit present");
    assert_abs_diff_eq!(cor, 110.0, epsilon = 1e-9);
    assert_abs_diff_eq!(
        set.angle_in_degrees().map(|d| d.value()).unwrap_or_default(),
        45.0,
        epsilon = 1e-9
    );
}
