use fibscope_indicator::fibonacci::{EXTENSION_RATIOS, RETRACEMENT_RATIOS};
use fibscope_indicator::{LevelKind, calculate_fibonacci_levels};

fn close_to(a: f64, b: f64, eps: f64) -> bool {
    (a - b).abs() <= eps
}

#[test]
fn test_retracement_50_is_midpoint() {
    for (high, low) in [(100.0, 0.0), (18_250.5, 17_120.25), (3.0, 1.0), (42.0, 42.0)] {
        let levels = calculate_fibonacci_levels(high, low);
        let mid = levels.get("Retracement 50%").unwrap();
        assert!(close_to(mid, (high + low) / 2.0, 1e-9), "{high} {low} -> {mid}");
    }
}

#[test]
fn test_extension_100_is_high() {
    for (high, low) in [(100.0, 0.0), (155.3, 149.1), (10.0, 20.0)] {
        let levels = calculate_fibonacci_levels(high, low);
        assert_eq!(levels.get("Extension 100%"), Some(high));
    }
}

#[test]
fn test_reference_range_0_to_100() {
    let levels = calculate_fibonacci_levels(100.0, 0.0);
    assert!(close_to(levels.get("Retracement 61.8%").unwrap(), 61.8, 0.01));
    assert!(close_to(levels.get("Extension 161.8%").unwrap(), 161.8, 0.01));
    assert!(close_to(levels.get("Retracement 23.6%").unwrap(), 23.6, 0.01));
    assert!(close_to(levels.get("Extension 261.8%").unwrap(), 261.8, 0.01));
}

#[test]
fn test_order_and_labels() {
    let levels = calculate_fibonacci_levels(100.0, 0.0);
    let labels: Vec<&str> = levels.iter().map(|level| level.label.as_str()).collect();
    assert_eq!(
        labels,
        vec![
            "Retracement 23.6%",
            "Retracement 38.2%",
            "Retracement 50%",
            "Retracement 61.8%",
            "Retracement 78.6%",
            "Extension 100%",
            "Extension 123.6%",
            "Extension 138.2%",
            "Extension 150%",
            "Extension 161.8%",
            "Extension 178.6%",
            "Extension 200%",
            "Extension 261.8%",
        ]
    );
    assert_eq!(levels.len(), RETRACEMENT_RATIOS.len() + EXTENSION_RATIOS.len());
    assert!(levels.iter().take(5).all(|level| level.kind == LevelKind::Retracement));
    assert!(levels.iter().skip(5).all(|level| level.kind == LevelKind::Extension));
}

#[test]
fn test_degenerate_range_is_flat() {
    let levels = calculate_fibonacci_levels(123.45, 123.45);
    assert!(!levels.is_empty());
    for level in &levels {
        assert_eq!(level.price, 123.45, "{}", level.label);
    }
}

#[test]
fn test_inverted_range_still_computes() {
    // high < low：价位方向反转，但仍满足同样的公式
    let levels = calculate_fibonacci_levels(0.0, 100.0);
    assert!(close_to(levels.get("Retracement 61.8%").unwrap(), 38.2, 1e-9));
    assert!(close_to(levels.get("Extension 200%").unwrap(), -100.0, 1e-9));
}

#[test]
fn test_idempotent_bit_identical() {
    let a = calculate_fibonacci_levels(18_532.17, 17_981.03);
    let b = calculate_fibonacci_levels(18_532.17, 17_981.03);
    assert_eq!(a, b);
    for (x, y) in a.iter().zip(b.iter()) {
        assert_eq!(x.price.to_bits(), y.price.to_bits());
    }
}

#[test]
fn test_unknown_label_is_none() {
    let levels = calculate_fibonacci_levels(2.0, 1.0);
    assert_eq!(levels.get("Retracement 61%"), None);
}

#[test]
fn test_level_set_serializes_in_order() {
    let levels = calculate_fibonacci_levels(2.0, 1.0);
    let json = serde_json::to_value(&levels).unwrap();
    let first = &json["levels"][0];
    assert_eq!(first["label"], "Retracement 23.6%");
    assert_eq!(first["kind"], "Retracement");
}
