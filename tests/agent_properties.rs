use rand::{Rng, SeedableRng, rngs::StdRng};
use tabular_agent::tabular::{AgentConfig, TabularAgent, q_table};

const TOLERANCE: f64 = 1e-9;

#[test]
fn unseen_states_start_at_zero_for_every_action_count() {
    for num_actions in 1..=10 {
        let mut agent: TabularAgent<String> = TabularAgent::new(num_actions).with_seed(1);
        let row = agent.q_table_mut().row(&"unseen".to_string()).to_vec();
        assert_eq!(row, vec![0.0; num_actions]);
    }
}

#[test]
fn epsilon_follows_closed_form_decay() {
    let decay = 0.97;
    let floor = 0.05;
    let config = AgentConfig::new(3)
        .with_epsilon_decay(decay)
        .with_epsilon_min(floor)
        .with_seed(2);
    let mut agent = TabularAgent::from_config(config).unwrap();
    let mut rng = StdRng::seed_from_u64(3);

    let mut previous = agent.epsilon();
    for k in 1..=200 {
        let state: u8 = rng.random_range(0..10);
        let next: u8 = rng.random_range(0..10);
        let action = agent.select_action(&state);
        agent.step(state, action, rng.random_range(-1.0..1.0), &next, rng.random_bool(0.1));

        let expected = decay.powi(k).max(floor);
        assert!(
            (agent.epsilon() - expected).abs() < TOLERANCE,
            "step {k}: epsilon {} expected {expected}",
            agent.epsilon()
        );
        assert!(agent.epsilon() <= previous);
        assert!(agent.epsilon() >= floor);
        previous = agent.epsilon();
    }
}

#[test]
fn terminal_update_only_uses_reward() {
    let mut agent = TabularAgent::new(4).with_seed(4);
    agent
        .q_table_mut()
        .insert("s", vec![0.3, -0.2, 0.0, 1.0])
        .unwrap();
    agent
        .q_table_mut()
        .insert("t", vec![50.0, 60.0, 70.0, 80.0])
        .unwrap();

    agent.step("s", 3, -2.0, &"t", true);

    let expected = 1.0 + 0.01 * (-2.0 - 1.0);
    let row = agent.q_table().get(&"s").unwrap();
    assert!((row[3] - expected).abs() < TOLERANCE);
    assert_eq!(&row[..3], &[0.3, -0.2, 0.0]);
    assert_eq!(agent.q_table().get(&"t").unwrap(), &[50.0, 60.0, 70.0, 80.0]);
}

#[test]
fn greedy_target_when_epsilon_pinned_to_zero() {
    let config = AgentConfig::new(2)
        .with_alpha(0.01)
        .with_gamma(1.0)
        .with_epsilon_min(0.0)
        .with_seed(5);
    let mut agent = TabularAgent::from_config(config).unwrap();
    agent.q_table_mut().insert("s0", vec![0.0, 0.0]).unwrap();
    agent.q_table_mut().insert("s1", vec![2.0, 4.0]).unwrap();
    agent.set_epsilon(0.0);

    assert_eq!(agent.expected_next_return(&"s1", false), 4.0);

    agent.step("s0", 0, 1.0, &"s1", false);
    let row = agent.q_table().get(&"s0").unwrap();
    assert!((row[0] - 0.05).abs() < TOLERANCE);
    assert_eq!(row[1], 0.0);
    assert_eq!(agent.epsilon(), 0.0);
}

#[test]
fn exploratory_target_is_row_mean() {
    let mut agent = TabularAgent::new(5).with_seed(6);
    let values = vec![-3.0, 1.0, 4.0, 1.5, 9.0];
    agent.q_table_mut().insert(7u64, values.clone()).unwrap();
    agent.set_epsilon(1.0);
    assert_eq!(
        agent.expected_next_return(&7, false),
        q_table::mean_value(&values)
    );
}

#[test]
fn greedy_selection_is_deterministic_with_low_tie_break() {
    let mut agent = TabularAgent::new(6).with_seed(7);
    let mut rng = StdRng::seed_from_u64(8);
    agent.set_epsilon(0.0);

    for state in 0..50u32 {
        // Coarse values so ties are common
        let row: Vec<f64> = (0..6).map(|_| f64::from(rng.random_range(0..3u8))).collect();
        let expected = row
            .iter()
            .position(|&v| v == row.iter().copied().fold(f64::NEG_INFINITY, f64::max))
            .unwrap();
        agent.q_table_mut().insert(state, row).unwrap();
        for _ in 0..5 {
            assert_eq!(agent.select_action(&state), expected);
        }
    }
}

#[test]
fn independent_agents_do_not_share_tables() {
    let mut first = TabularAgent::new(2).with_seed(9);
    let second: TabularAgent<&str> = TabularAgent::new(2).with_seed(9);
    first.step("s", 0, 1.0, &"t", false);
    assert_eq!(first.q_table().len(), 2);
    assert!(second.q_table().is_empty());
    assert_eq!(second.epsilon(), 1.0);
}
