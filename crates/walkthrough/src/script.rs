//! Scripted input
//!
//! Stands in for a keyboard and mouse: a list of steps, each holding some
//! keys and buttons and moving the mouse at a fixed rate for a number of
//! frames. The script repeats until the frame budget runs out.

use fps_engine::input::{InputState, KeyCode, MouseButton};
use fps_engine::{AppError, Application, Engine};

use crate::config::DemoConfig;
use crate::level;

/// One step of the script
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptStep {
    /// Label for the log
    pub label: &'static str,
    /// How long the step lasts
    pub frames: u32,
    /// Keys held for the whole step
    pub keys: Vec<KeyCode>,
    /// Mouse buttons held for the whole step
    pub buttons: Vec<MouseButton>,
    /// Mouse movement per frame
    pub mouse_rate: (f32, f32),
}

impl ScriptStep {
    /// Hold nothing for a while
    pub fn idle(label: &'static str, frames: u32) -> Self {
        Self {
            label,
            frames,
            keys: Vec::new(),
            buttons: Vec::new(),
            mouse_rate: (0.0, 0.0),
        }
    }

    /// Hold keys for a while
    pub fn hold(label: &'static str, frames: u32, keys: &[KeyCode]) -> Self {
        Self {
            keys: keys.to_vec(),
            ..Self::idle(label, frames)
        }
    }

    /// Also hold a mouse button
    pub fn with_button(mut self, button: MouseButton) -> Self {
        self.buttons.push(button);
        self
    }

    /// Also move the mouse every frame
    pub fn with_mouse_rate(mut self, dx: f32, dy: f32) -> Self {
        self.mouse_rate = (dx, dy);
        self
    }
}

/// The tour of the reference level: settle, walk, turn, jump, crouch, sneak
/// and zoom
pub fn default_script(turn_rate: f32) -> Vec<ScriptStep> {
    vec![
        ScriptStep::idle("settle", 90),
        ScriptStep::hold("walk", 120, &[KeyCode::W]),
        ScriptStep::idle("turn", 60).with_mouse_rate(turn_rate, 0.0),
        ScriptStep::hold("strafe", 60, &[KeyCode::W, KeyCode::D]),
        ScriptStep::hold("jump", 1, &[KeyCode::Space]),
        ScriptStep::idle("airborne", 60),
        ScriptStep::hold("crouch", 90, &[KeyCode::LeftControl, KeyCode::W]),
        ScriptStep::hold("sneak", 90, &[KeyCode::LeftShift, KeyCode::W]),
        ScriptStep::idle("zoom", 60)
            .with_button(MouseButton::Right)
            .with_mouse_rate(0.0, turn_rate * 0.5),
        ScriptStep::hold("back", 60, &[KeyCode::S]).with_mouse_rate(-turn_rate, -turn_rate * 0.5),
    ]
}

/// Application that walks the reference level from a script
pub struct ScriptedWalk {
    script: Vec<ScriptStep>,
    settings: DemoConfig,
    frame: u32,
    mouse: (f32, f32),
    current_label: &'static str,
}

impl ScriptedWalk {
    /// Create the walk with the default tour
    pub fn new(settings: DemoConfig) -> Self {
        let script = default_script(settings.turn_rate);
        Self::with_script(settings, script)
    }

    /// Create the walk with a custom script
    pub fn with_script(settings: DemoConfig, script: Vec<ScriptStep>) -> Self {
        Self {
            script,
            settings,
            frame: 0,
            mouse: (0.0, 0.0),
            current_label: "",
        }
    }

    /// Frames run so far
    pub fn frame(&self) -> u32 {
        self.frame
    }

    /// Frames in one pass of the script
    pub fn script_length(&self) -> u32 {
        self.script.iter().map(|step| step.frames).sum()
    }

    /// The step that drives the given frame, looping over the script
    pub fn step_at(&self, frame: u32) -> Option<&ScriptStep> {
        let length = self.script_length();
        if length == 0 {
            return None;
        }

        let mut offset = frame % length;
        for step in &self.script {
            if offset < step.frames {
                return Some(step);
            }
            offset -= step.frames;
        }
        None
    }
}

impl Application for ScriptedWalk {
    fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError> {
        log::info!("Initializing scripted walk ({} frames per pass)", self.script_length());

        let scene = level::build_scene().map_err(fps_engine::EngineError::from)?;
        engine.load_scene(scene);
        Ok(())
    }

    fn poll_input(&mut self, _engine: &Engine) -> Result<InputState, AppError> {
        let step = self
            .step_at(self.frame)
            .cloned()
            .ok_or_else(|| AppError::Custom("empty input script".to_string()))?;

        if step.label != self.current_label {
            log::debug!("Script step: {}", step.label);
            self.current_label = step.label;
        }

        self.mouse.0 += step.mouse_rate.0;
        self.mouse.1 += step.mouse_rate.1;

        let mut state = InputState::new().with_mouse_position(self.mouse.0, self.mouse.1);
        for key in &step.keys {
            state.press(*key);
        }
        for button in &step.buttons {
            state.set_button(*button, true);
        }
        Ok(state)
    }

    fn update(&mut self, engine: &mut Engine, _delta_time: f32) -> Result<(), AppError> {
        self.frame += 1;

        if self.settings.log_interval > 0 && self.frame % self.settings.log_interval == 0 {
            let motion = engine.motion();
            let position = engine.camera.position();
            log::info!(
                "frame {:>5} [{}] position ({:.2}, {:.2}, {:.2}) speed {:.3} yaw {:.3} pitch {:.3} {}{}{}{}",
                self.frame,
                self.current_label,
                position.x,
                position.y,
                position.z,
                motion.velocity.norm(),
                motion.yaw,
                motion.pitch,
                if motion.is_in_air { "airborne" } else { "grounded" },
                if motion.is_crouching { " crouching" } else { "" },
                if motion.is_sneaking { " sneaking" } else { "" },
                if engine.camera.projection.is_zoomed() { " zoomed" } else { "" },
            );
        }

        if self.frame >= self.settings.frames {
            log::info!("Frame budget of {} reached", self.settings.frames);
            engine.quit();
        }
        Ok(())
    }

    fn fixed_time_step(&self) -> Option<f32> {
        Some(self.settings.time_step)
    }

    fn cleanup(&mut self, engine: &mut Engine) {
        let position = engine.camera.position();
        log::info!(
            "Walk finished after {} frames at ({:.2}, {:.2}, {:.2})",
            self.frame,
            position.x,
            position.y,
            position.z
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fps_engine::EngineConfig;

    fn settings(frames: u32) -> DemoConfig {
        DemoConfig {
            frames,
            ..DemoConfig::default()
        }
    }

    #[test]
    fn test_steps_loop_over_the_script() {
        let walk = ScriptedWalk::with_script(
            settings(10),
            vec![ScriptStep::idle("a", 2), ScriptStep::hold("b", 3, &[KeyCode::W])],
        );

        assert_eq!(walk.script_length(), 5);
        assert_eq!(walk.step_at(0).unwrap().label, "a");
        assert_eq!(walk.step_at(2).unwrap().label, "b");
        assert_eq!(walk.step_at(4).unwrap().label, "b");
        assert_eq!(walk.step_at(5).unwrap().label, "a");
    }

    #[test]
    fn test_empty_script_fails_input() {
        let mut walk = ScriptedWalk::with_script(settings(10), Vec::new());
        let engine = Engine::new(EngineConfig::default()).unwrap();
        assert!(matches!(walk.poll_input(&engine), Err(AppError::Custom(_))));
    }

    #[test]
    fn test_mouse_accumulates_while_turning() {
        let mut walk = ScriptedWalk::with_script(
            settings(10),
            vec![ScriptStep::hold("turn", 4, &[KeyCode::A]).with_mouse_rate(3.0, -1.0)],
        );
        let engine = Engine::new(EngineConfig::default()).unwrap();

        walk.poll_input(&engine).unwrap();
        let state = walk.poll_input(&engine).unwrap();

        assert_eq!(state.mouse_position(), (6.0, -2.0));
        assert!(state.is_key_down(KeyCode::A));
        assert!(!state.is_key_down(KeyCode::W));
    }

    #[test]
    fn test_default_tour_runs_to_budget() {
        let mut walk = ScriptedWalk::new(settings(700));
        Engine::run(EngineConfig::default(), &mut walk).unwrap();
        assert_eq!(walk.frame(), 700);
    }

    #[test]
    fn test_default_tour_stays_in_the_room() {
        let mut walk = ScriptedWalk::new(settings(400));
        let mut engine = Engine::new(EngineConfig::default()).unwrap();
        walk.initialize(&mut engine).unwrap();

        for _ in 0..400 {
            let input = walk.poll_input(&engine).unwrap();
            engine.tick(1.0 / 60.0, input);
            walk.update(&mut engine, 1.0 / 60.0).unwrap();

            let position = engine.camera.position();
            assert!(position.x.abs() < 300.0);
            assert!(position.z < 100.0 && position.z > -500.0);
            assert!(position.y > 0.0);
        }
    }
}
