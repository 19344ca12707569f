use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use mesh_metric::adapt::{
    BarycentricRequest, BoundaryRequest, EdgeRequest, MetricInterpolator, MetricKernels,
    RidgeRequest,
};
use mesh_metric::data::{MetricField, MetricMode};
use mesh_metric::geometry::SymTensor3;
use mesh_metric::mesh_error::MeshMetricError;
use mesh_metric::topology::{PointId, PointTags, TetMesh};

/// Volume-only kernels; every benchmarked edge is internal.
struct VolumeKernels;

impl MetricKernels<TetMesh> for VolumeKernels {
    fn ridge_metric(
        &self,
        _mesh: &TetMesh,
        _metrics: &MetricField,
        _request: &RidgeRequest,
    ) -> Result<SymTensor3, MeshMetricError> {
        Err(MeshMetricError::KernelFailure("no surface".into()))
    }

    fn boundary_metric(
        &self,
        _mesh: &TetMesh,
        _metrics: &MetricField,
        _request: &BoundaryRequest,
    ) -> Result<SymTensor3, MeshMetricError> {
        Err(MeshMetricError::KernelFailure("no surface".into()))
    }
}

/// A column of `n` tetrahedra glued face to face, one new point per
/// tetrahedron, and an anisotropic field over all of it.
fn build_column(n: usize) -> (TetMesh, MetricField, Vec<PointId>, Vec<PointId>) {
    let mut mesh = TetMesh::new();
    let mut window: Vec<PointId> = (0..3).map(|_| mesh.add_vertex(PointTags::empty())).collect();
    let mut tetras = Vec::with_capacity(n);
    for _ in 0..n {
        let apex = mesh.add_vertex(PointTags::empty());
        let t = mesh
            .add_tetra([window[0], window[1], window[2], apex])
            .expect("vertices exist");
        tetras.push(t);
        window = vec![window[1], window[2], apex];
    }
    let new_points: Vec<PointId> = (0..n).map(|_| mesh.add_vertex(PointTags::empty())).collect();

    let mut metrics = MetricField::new(MetricMode::Anisotropic, mesh.num_vertices());
    for raw in 1..=(n + 3) as u64 {
        let h = 1.0 + 0.01 * raw as f64;
        let m = SymTensor3::new([h, 0.1, 0.0, 2.0 * h, 0.05, 3.0 * h]);
        metrics
            .set_tensor(PointId::new(raw).expect("nonzero PointId"), m)
            .expect("in range");
    }
    (mesh, metrics, tetras, new_points)
}

fn bench_interpolation(c: &mut Criterion) {
    let mut group = c.benchmark_group("metric_interpolation");

    for &n in &[1_000usize, 10_000] {
        let (mesh, metrics, tetras, new_points) = build_column(n);
        let interp = MetricInterpolator::new(&mesh, &VolumeKernels);
        let edges: Vec<EdgeRequest> = tetras
            .iter()
            .zip(&new_points)
            .enumerate()
            .map(|(i, (&tetra, &new_point))| EdgeRequest {
                tetra,
                edge: i % 6,
                new_point,
                s: 0.3,
            })
            .collect();
        let interior: Vec<BarycentricRequest> = tetras
            .iter()
            .zip(&new_points)
            .map(|(&tetra, &new_point)| BarycentricRequest {
                tetra,
                new_point,
                weights: [0.1, 0.2, 0.3, 0.4],
            })
            .collect();

        group.bench_with_input(BenchmarkId::new("edges", n), &n, |b, _| {
            b.iter(|| {
                let mut field = metrics.clone();
                let out = interp.interpolate_edges(&mut field, &edges);
                black_box(out);
            });
        });

        group.bench_with_input(BenchmarkId::new("barycentric", n), &n, |b, _| {
            b.iter(|| {
                let mut field = metrics.clone();
                let out = interp.interpolate_barycentric_batch(&mut field, &interior);
                black_box(out);
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_interpolation);
criterion_main!(benches);
