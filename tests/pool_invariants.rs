//! Property tests: the pool keeps its size and its trails stay bounded
//! under any sequence of controller operations.

use proptest::prelude::*;
use trailsim::{Simulation, SimulationConfig};

#[derive(Debug, Clone)]
enum Op {
    Update(f32),
    Reset,
    SetCount(usize),
    SetTrail(usize),
    Pause(bool),
    Attractor(bool),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (-0.1f32..5.0).prop_map(Op::Update),
        1 => Just(Op::Reset),
        1 => (0usize..1000).prop_map(Op::SetCount),
        1 => (0usize..20).prop_map(Op::SetTrail),
        1 => any::<bool>().prop_map(Op::Pause),
        1 => any::<bool>().prop_map(Op::Attractor),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn test_pool_size_and_trails_hold(seed in any::<u64>(), ops in prop::collection::vec(op(), 1..40)) {
        let mut sim = Simulation::new(SimulationConfig::default().with_seed(seed)).unwrap();

        for op in ops {
            match op {
                Op::Update(dt) => sim.update(dt),
                Op::Reset => sim.reset(),
                Op::SetCount(n) => { sim.set_particle_count(n); }
                Op::SetTrail(n) => { sim.set_trail_length(n); }
                Op::Pause(p) => sim.set_paused(p),
                Op::Attractor(a) => sim.set_attractor_active(a),
            }

            prop_assert_eq!(sim.particles().len(), sim.particle_count());
            prop_assert!(sim.particle_limits().contains(sim.particle_count()));
            prop_assert!(sim.trail_limits().contains(sim.trail_length()));
            for p in sim.particles() {
                prop_assert!(p.is_alive());
                prop_assert!(p.lifetime() <= p.max_lifetime());
                prop_assert!(p.trail().len() <= sim.trail_length().max(1));
            }
        }
    }
}
