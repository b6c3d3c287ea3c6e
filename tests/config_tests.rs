use interval_uct::{OptimizerConfig, TuneError};

#[test]
fn test_config_builder_methods() {
    // Test that all builder methods correctly set their respective values
    let config = OptimizerConfig::default()
        .with_iterations(5000)
        .with_exploration_constant(2.0)
        .with_branching_factor(4)
        .with_horizon(20)
        .with_seed(17);

    // Verify each setting was applied correctly
    assert_eq!(config.iterations, 5000);
    assert_eq!(config.exploration_constant, 2.0);
    assert_eq!(config.branching_factor, 4);
    assert_eq!(config.horizon, Some(20));
    assert_eq!(config.seed, Some(17));
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_default_values() {
    let config = OptimizerConfig::default();

    assert_eq!(config.iterations, 100);
    assert!((config.exploration_constant - 0.3).abs() < 1e-12);
    assert_eq!(config.branching_factor, 10);
    assert_eq!(config.horizon, None);
    assert_eq!(config.seed, None);
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_validation() {
    let rejected = [
        OptimizerConfig::default().with_iterations(0),
        OptimizerConfig::default().with_branching_factor(0),
        OptimizerConfig::default().with_exploration_constant(-0.1),
        OptimizerConfig::default().with_exploration_constant(f64::INFINITY),
        OptimizerConfig::default().with_horizon(0),
    ];

    for config in rejected {
        match config.validate() {
            Err(TuneError::InvalidConfiguration(message)) => assert!(!message.is_empty()),
            other => panic!("expected a configuration error for {:?}, got {:?}", config, other),
        }
    }

    // A single slot per level is degenerate but searchable
    assert!(OptimizerConfig::default()
        .with_branching_factor(1)
        .with_exploration_constant(0.0)
        .validate()
        .is_ok());
}
