use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rigmotion_core::{
    BlinkConfig, BlinkManager, Curve, CurveTarget, Motion, MotionFade, MotionManager, MotionMeta,
    ParameterStore, Point, SeededRandom,
};

fn build_motion(curves: usize) -> (Motion, ParameterStore) {
    let mut table = ParameterStore::new();
    let mut list = Vec::with_capacity(curves);
    for i in 0..curves {
        let id = format!("Param{i}");
        table.add_parameter(&id, -30.0, 30.0, 0.0);
        let curve = Curve::builder(CurveTarget::Parameter, id, Point::new(0.0, 0.0))
            .linear(Point::new(1.0, 10.0))
            .bezier(Point::new(1.5, 12.0), Point::new(2.0, -5.0), Point::new(3.0, 0.0))
            .stepped(Point::new(3.5, 2.0))
            .linear(Point::new(4.0, 0.0))
            .build()
            .unwrap();
        list.push(curve);
    }
    let motion = Motion::new(
        MotionMeta {
            duration: 4.0,
            looping: true,
            ..MotionMeta::default()
        },
        MotionFade {
            fade_in_time: 0.5,
            fade_out_time: 0.5,
        },
        None,
        list,
    )
    .unwrap();
    (motion, table)
}

fn bench_motion_tick(c: &mut Criterion) {
    for curves in [16usize, 128] {
        let (motion, mut table) = build_motion(curves);
        let mut mm = MotionManager::default();
        let id = mm.start(motion);
        mm.handler_mut().register(id);
        c.bench_function(&format!("motion_tick_{curves}_curves"), |b| {
            b.iter(|| mm.update(black_box(1.0 / 60.0), &mut table).unwrap())
        });
    }
}

fn bench_blink_tick(c: &mut Criterion) {
    let mut table = ParameterStore::new()
        .with_parameter("ParamEyeLOpen", 0.0, 1.0, 1.0)
        .with_parameter("ParamEyeROpen", 0.0, 1.0, 1.0);
    let mut blink = BlinkManager::new(
        vec!["ParamEyeLOpen".into(), "ParamEyeROpen".into()],
        BlinkConfig::default(),
        Box::new(SeededRandom::new(7)),
    )
    .unwrap();
    c.bench_function("blink_tick", |b| {
        b.iter(|| blink.update(black_box(1.0 / 60.0), &mut table))
    });
}

criterion_group!(benches, bench_motion_tick, bench_blink_tick);
criterion_main!(benches);
