//! # Control Cycle Benchmark

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use comms_if::ds::{ControlWord, DsSample, LifecycleEvent, OperatorInput, OperatorState};
use robot_lib::{
    builder::{RobotBuilder, RobotParams},
    cargo_guide::SolenoidCargoGuide,
    drive::{DriveParams, MecanumDrive},
    driver_station::{DriverStation, LifecycleObserver},
    hook::SolenoidHook,
    launcher::{FlywheelLauncher, LauncherParams},
    robot::Robot,
    sim::{SimChassis, SimMotor, SimParams, SimSolenoid}};

/// Driver station which discards lifecycle events, so a long run doesn't accumulate them.
struct BenchDriverStation {
    sample: DsSample,
}

impl LifecycleObserver for BenchDriverStation {
    fn observe(&mut self, _event: LifecycleEvent) {}
}

impl DriverStation for BenchDriverStation {
    fn control_word(&mut self) -> ControlWord {
        self.sample.control
    }

    fn operator_input(&self) -> OperatorInput {
        self.sample.input
    }
}

fn build(null_drive: bool) -> Robot {
    let builder = RobotBuilder::new()
        .hook(SolenoidHook::new(SimSolenoid::new()))
        .launcher(FlywheelLauncher::new(
            SimMotor::new(),
            SimSolenoid::new(),
            LauncherParams::default()
        ))
        .cargo_guide(SolenoidCargoGuide::new(SimSolenoid::new()));

    let builder = if null_drive {
        builder.null_drive()
    }
    else {
        let chassis = SimChassis::new(SimParams::default());
        let train = chassis.drive_train();
        builder
            .gyroscope(chassis.gyroscope())
            .drive(|gyro| MecanumDrive::new(train, gyro, DriveParams::default()))
    };

    builder.build(RobotParams::default()).unwrap()
}

fn cycle_benchmark(c: &mut Criterion) {
    let teleop = DsSample {
        control: ControlWord::enabled(OperatorState::Teleoperated),
        input: OperatorInput {
            drive_x: 0.3,
            drive_y: 0.7,
            aim_x: 0.8,
            aim_y: 0.2,
            spin_up: true,
            ..OperatorInput::default()
        },
    };

    let mut group = c.benchmark_group("cycle");

    for (name, null_drive) in [("mecanum", false), ("null_drive", true)].iter() {
        let mut robot = build(*null_drive);
        let mut ds = BenchDriverStation { sample: teleop };

        group.bench_function(*name, |b| b.iter(|| {
            black_box(robot.step(&mut ds).unwrap());
        }));
    }

    // A transition every cycle, the worst case for the loop
    let mut robot = build(false);
    let mut ds = BenchDriverStation { sample: teleop };
    let mut autonomous = false;

    group.bench_function("transition", |b| b.iter(|| {
        autonomous = !autonomous;
        ds.sample.control = ControlWord::enabled(if autonomous {
            OperatorState::Autonomous
        }
        else {
            OperatorState::Teleoperated
        });
        black_box(robot.step(&mut ds).unwrap());
    }));

    group.finish();
}

criterion_group!(benches, cycle_benchmark);
criterion_main!(benches);
