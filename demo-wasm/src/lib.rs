use wasm_bindgen::prelude::*;
use wriggle::{BodyPlan, RigError, Simulation, Vec2};

// ---- Lizard Demo ----

#[wasm_bindgen]
pub struct CreatureDemo {
    sim: Simulation<f32>,
    target: Vec2<f32>,
}

#[wasm_bindgen]
impl CreatureDemo {
    /// A lizard with `leg_pairs` pairs of legs and a `tail`-segment tail. Zero
    /// for either picks random proportions.
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u32, leg_pairs: usize, tail: usize) -> Result<CreatureDemo, JsError> {
        let start = Vec2::new(320.0f32, 240.0);
        let sim = Simulation::from_seed(seed as u64, |rng| {
            let plan = if leg_pairs == 0 || tail == 0 {
                BodyPlan::random(rng)
            } else {
                BodyPlan::new(12.0 / (leg_pairs as f32).sqrt(), leg_pairs, tail)
            };
            plan.build(start, 0.0, rng)
        })
        .map_err(|e: RigError| JsError::new(&e.to_string()))?;
        Ok(CreatureDemo { sim, target: start })
    }

    pub fn set_target(&mut self, x: f32, y: f32) {
        self.target = Vec2::new(x, y);
    }

    pub fn update(&mut self) {
        self.sim.tick(self.target);
    }

    /// Returns flat [px, py, x, y, thickness, tension, ...] per segment, parent first.
    pub fn segments(&self) -> Vec<f32> {
        let skeleton = self.sim.creature().skeleton();
        let mut out = Vec::with_capacity(skeleton.len() * 6);
        for (_, seg) in skeleton.iter() {
            let (from, _) = skeleton.pose(seg.parent());
            let to = seg.position();
            out.extend_from_slice(&[from.x, from.y, to.x, to.y, seg.thickness(), seg.tension()]);
        }
        out
    }

    /// Returns [x, y, heading, body_size, heartbeat, breathing]
    pub fn body(&self) -> Vec<f32> {
        let c = self.sim.creature();
        let p = c.position();
        vec![p.x, p.y, c.heading(), c.body_size(), c.heartbeat(), c.breathing()]
    }

    /// Returns flat [x0, y0, x1, y1, ...] foot goals, one per leg.
    pub fn foot_goals(&self) -> Vec<f32> {
        let mut out = Vec::new();
        for gait in self.sim.creature().limbs().iter().filter_map(|l| l.gait()) {
            out.push(gait.goal().x);
            out.push(gait.goal().y);
        }
        out
    }

    pub fn segment_count(&self) -> usize {
        self.sim.creature().skeleton().len()
    }

    /// Number of segments hanging directly off the body.
    pub fn root_count(&self) -> usize {
        self.sim.creature().skeleton().roots().len()
    }
}
