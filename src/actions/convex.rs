use super::gather::{self, attachment_parent, combined_geometries};
use super::{ConvexShapeReport, ShapeSynthesizer};
use crate::config::ParameterSource;
use crate::error::SynthesisError;
use crate::math::Point;
use crate::scene::{NodeKey, SceneGraph};
use crate::transformation::{ConvexDecomposition, HullAlgorithm};
use crate::writer::ShapeGraphWriter;

impl<H: HullAlgorithm, D: ConvexDecomposition> ShapeSynthesizer<'_, H, D> {
    /// Replaces the collision shape of the parent of `geometry` by the convex hull of
    /// the geometry.
    pub fn create_convex_shape<S, P>(
        &self,
        scene: &mut S,
        geometry: NodeKey,
        params: &mut P,
    ) -> Result<ConvexShapeReport, SynthesisError>
    where
        S: SceneGraph + ?Sized,
        P: ParameterSource + ?Sized,
    {
        let parent = attachment_parent(&*scene, geometry)?;
        let points = gather::gather_hull_points(&*scene, &[geometry])?;

        self.convex_shape(scene, parent, &points, params)
    }

    /// Replaces the collision shape of the root by the convex hull of every triangle
    /// geometry of the scene.
    pub fn create_combined_convex_shape<S, P>(
        &self,
        scene: &mut S,
        params: &mut P,
    ) -> Result<ConvexShapeReport, SynthesisError>
    where
        S: SceneGraph + ?Sized,
        P: ParameterSource + ?Sized,
    {
        let (root, geometries) = combined_geometries(&*scene)?;
        let points = gather::gather_hull_points(&*scene, &geometries)?;

        self.convex_shape(scene, root, &points, params)
    }

    fn convex_shape<S, P>(
        &self,
        scene: &mut S,
        parent: NodeKey,
        points: &[Point],
        params: &mut P,
    ) -> Result<ConvexShapeReport, SynthesisError>
    where
        S: SceneGraph + ?Sized,
        P: ParameterSource + ?Sized,
    {
        let settings = params.hull_settings().ok_or(SynthesisError::UserCancelled)?;
        settings.validate()?;
        let hull = self.hull.build(
            points,
            settings.tolerance,
            settings.radius,
            scene.version().havok_scale(),
        )?;

        let mut writer = ShapeGraphWriter::new(scene);
        let shape = writer.convex_shape(&hull);
        let object = writer.ensure_collision_object(parent);
        let body = writer.ensure_rigid_body(object);
        writer.replace_shape(body, shape);

        info!(
            "created hull with {} vertices, {} normals",
            hull.vertices.len(),
            hull.normals.len()
        );

        Ok(ConvexShapeReport {
            shape,
            body,
            num_vertices: hull.vertices.len(),
            num_normals: hull.normals.len(),
        })
    }
}
