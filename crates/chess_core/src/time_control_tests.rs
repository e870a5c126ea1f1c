use super::*;
use std::thread;

#[test]
fn test_fixed_depth_limits_have_no_clock() {
    let limits = SearchLimits::depth(5);
    assert_eq!(limits.depth, 5);
    assert_eq!(limits.move_time, None);
    assert_eq!(limits.time_control.remaining(), None);
    assert!(!limits.should_stop());
}

#[test]
fn test_new_carries_budget() {
    let limits = SearchLimits::new(4, Some(Duration::from_millis(100))).unwrap();
    assert_eq!(limits.depth, 4);
    assert_eq!(limits.move_time, Some(Duration::from_millis(100)));
    assert_eq!(
        limits.time_control.remaining(),
        Some(Duration::from_millis(100))
    );
}

#[test]
fn test_zero_depth_is_illegal_configuration() {
    assert!(matches!(
        SearchLimits::new(0, None),
        Err(ChessError::IllegalConfiguration(_))
    ));
    assert!(SearchLimits::depth(0).validate().is_err());
}

#[test]
fn test_budget_expires() {
    let tc = TimeControl::new(Some(Duration::from_millis(10)));
    tc.start();
    assert!(!tc.check_time());

    thread::sleep(Duration::from_millis(20));
    assert!(tc.check_time());
    assert!(tc.is_stopped());
    assert_eq!(tc.remaining(), Some(Duration::ZERO));
}

#[test]
fn test_restart_clears_stop_flag() {
    let tc = TimeControl::new(Some(Duration::from_secs(60)));
    tc.stop();
    assert!(tc.is_stopped());
    tc.start();
    assert!(!tc.is_stopped());
}

#[test]
fn test_no_budget_never_expires() {
    let tc = TimeControl::new(None);
    tc.start();
    thread::sleep(Duration::from_millis(10));
    assert!(!tc.check_time());
    assert!(tc.elapsed() >= Duration::from_millis(10));
}

#[test]
fn test_stop_from_clone() {
    let limits = SearchLimits::depth(3);
    limits.start();
    let handle = limits.time_control.clone();
    thread::spawn(move || handle.stop()).join().unwrap();
    assert!(limits.should_stop());
}

#[test]
fn test_clock_polled_at_interval() {
    let tc = TimeControl::new(None);
    assert!(tc.should_check_time(CLOCK_CHECK_INTERVAL));
    assert!(tc.should_check_time(3 * CLOCK_CHECK_INTERVAL));
    assert!(!tc.should_check_time(CLOCK_CHECK_INTERVAL + 1));
    assert_eq!(tc.elapsed(), Duration::ZERO);
}
