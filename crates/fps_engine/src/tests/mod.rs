//! Frame-loop scenarios driving the engine end to end

mod walkthrough_scenarios;
