pub const FPS_LIMIT: f64 = 50.;

pub mod robotmap {
    pub mod climber {
        pub const ROTATE_LEFT: i32 = 21;
        pub const ROTATE_RIGHT: i32 = 22;
        pub const EXTEND_LEFT: i32 = 23;
        pub const EXTEND_RIGHT: i32 = 24;
    }
}

pub mod climber {
    pub const CONFIG_PATH: &str = "/home/lvuser/climber.json";
    pub const DATA_LOG_PATH: &str = "/home/lvuser/climber_log.jsonl";
    // 8 channels at 50 Hz, about once a second
    pub const DATA_LOG_FLUSH_SAMPLES: usize = 400;

    // Rotation arm gearbox, degrees of arm travel per motor rotation
    pub const ROTATE_DEGREES_PER_ROTATION: f64 = 90. / 17.57;
    pub const EXTEND_UNITS_PER_ROTATION: f64 = 1.;

    // Profile limits, position units per second (and per second squared)
    pub const MAX_VELOCITY: f64 = 60.;
    pub const MAX_ACCELERATION: f64 = 120.;
    pub const ALLOWED_ERROR: f64 = 0.1;
    pub const SLOW_VELOCITY_SCALE: f64 = 0.5;

    pub const ROTATE_TRIM: f64 = 0.5; // degrees per cycle
    pub const EXTEND_TRIM: f64 = 1.0; // units per cycle

    pub const STICK_THRESHOLD: f64 = 0.3;
    pub const SLOW_TRIGGER_THRESHOLD: f64 = 0.5;
    pub const OVERRIDE_THRESHOLD: f64 = 0.1;

    pub const ROTATE_RIGHT_MIN: f64 = -45.;
    pub const ROTATE_RIGHT_MAX: f64 = 0.;
    pub const ROTATE_LEFT_MIN: f64 = 0.;
    pub const ROTATE_LEFT_MAX: f64 = 45.;
    pub const EXTEND_MIN: f64 = -10. * 9. / 16.;
    pub const EXTEND_MAX: f64 = 265. * 9. / 16.;

    // (left rotate, right rotate, left extend, right extend)
    pub const CLIMB_STEPS: [[f64; 4]; 8] = [
        [0., 0., 0., 0.],           // stowed
        [0., 0., 145., 145.],       // reach mid bar
        [0., 0., 2., 2.],           // pull onto mid bar
        [20., -20., 10., 10.],      // tip back
        [20., -20., 145., 145.],    // reach high bar
        [35., -35., 145., 145.],    // lean onto high bar
        [35., -35., 60., 60.],      // transfer
        [0., 0., 0., 0.],           // hang
    ];
}

pub mod joystick_map {
    // Joystick IDs (set in driver station)
    pub const OPERATOR: i32 = 1;

    // Operator buttons (Xbox layout)
    pub const RIGHT_ROTATE_UP: usize = 1; // A
    pub const RIGHT_ROTATE_DOWN: usize = 2; // B
    pub const LEFT_ROTATE_DOWN: usize = 3; // X
    pub const LEFT_ROTATE_UP: usize = 4; // Y
    pub const STEP_ADVANCE: usize = 5; // left bumper
    pub const FAST_MODE: usize = 6; // right bumper
    pub const STEP_RETREAT: usize = 7; // back
    pub const STEP_RESET: usize = 8; // start
    pub const ZERO_CLIMBER: usize = 9; // left stick click

    // Operator axes
    pub const LEFT_Y: i32 = 1;
    pub const OVERRIDE_TRIGGER: i32 = 2; // left trigger
    pub const SLOW_TRIGGER: i32 = 3; // right trigger
    pub const RIGHT_Y: i32 = 5;
}
