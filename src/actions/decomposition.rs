use super::gather::{self, attachment_parent, combined_geometries};
use super::{DecompositionReport, MoppStatus, ShapeSynthesizer, HAVOK_MATERIAL_ENUM};
use crate::config::ParameterSource;
use crate::error::SynthesisError;
use crate::mopp::{self, MoppBlob, MoppEncoder, MoppError};
use crate::scene::{NodeKey, SceneGraph};
use crate::transformation::{ConvexDecomposition, ConvexHullSet, HullAlgorithm, MeshBuffers};
use crate::writer::ShapeGraphWriter;

impl<H: HullAlgorithm, D: ConvexDecomposition> ShapeSynthesizer<'_, H, D> {
    /// Replaces the collision shape of the parent of `geometry` by a convex
    /// decomposition of the geometry.
    pub fn create_convex_decomposition<S, P>(
        &self,
        scene: &mut S,
        geometry: NodeKey,
        params: &mut P,
    ) -> Result<DecompositionReport, SynthesisError>
    where
        S: SceneGraph + ?Sized,
        P: ParameterSource + ?Sized,
    {
        let parent = attachment_parent(&*scene, geometry)?;
        let mesh = gather::gather_decomposition_mesh(&*scene, &[geometry], true)?;

        self.decomposition(scene, parent, &mesh, params)
    }

    /// Replaces the collision shape of the root by a convex decomposition of every
    /// triangle geometry of the scene.
    pub fn create_combined_convex_decomposition<S, P>(
        &self,
        scene: &mut S,
        params: &mut P,
    ) -> Result<DecompositionReport, SynthesisError>
    where
        S: SceneGraph + ?Sized,
        P: ParameterSource + ?Sized,
    {
        let (root, geometries) = combined_geometries(&*scene)?;
        let mesh = gather::gather_decomposition_mesh(&*scene, &geometries, false)?;

        self.decomposition(scene, root, &mesh, params)
    }

    fn decomposition<S, P>(
        &self,
        scene: &mut S,
        parent: NodeKey,
        mesh: &MeshBuffers,
        params: &mut P,
    ) -> Result<DecompositionReport, SynthesisError>
    where
        S: SceneGraph + ?Sized,
        P: ParameterSource + ?Sized,
    {
        let settings = params
            .decomposition_settings()
            .ok_or(SynthesisError::UserCancelled)?;
        settings.validate()?;
        let material = material_tag(&*scene, &settings.material);
        let params = settings.to_params(material);

        let set = self
            .decomposer
            .decompose(mesh, &params, scene.version().havok_scale())?;
        let (blob, status) = self.mopp_tree(&set);

        let mut writer = ShapeGraphWriter::new(scene);
        let hulls: Vec<_> = set
            .pieces
            .iter()
            .map(|piece| writer.hull_piece(piece, params.hull_radius))
            .collect();
        let list = writer.list_shape(hulls.clone(), material);
        let object = writer.ensure_collision_object(parent);
        let shape = match blob {
            Some(blob) => writer.mopp_tree(list, blob),
            None => list,
        };
        let body = writer.ensure_rigid_body(object);
        writer.configure_body(body, params.treat_as_static);
        writer.replace_shape(body, shape);

        info!("created decomposition with {} convex surfaces", hulls.len());

        Ok(DecompositionReport {
            shape,
            list,
            hulls,
            body,
            mopp: status,
        })
    }

    fn mopp_tree(&self, set: &ConvexHullSet) -> (Option<MoppBlob>, MoppStatus) {
        if !mopp::needs_mopp(set.len()) {
            return (None, MoppStatus::NotRequired);
        }

        match MoppEncoder::encode(self.mopp, set.vertex_batches()) {
            Ok(blob) => {
                let code_len = blob.code.len();
                (Some(blob), MoppStatus::Built { code_len })
            }
            Err(MoppError::Unavailable(msg)) => {
                warn!("{}, writing the list shape without MOPP tree", msg);
                (None, MoppStatus::Unavailable(msg))
            }
            Err(err) => {
                error!("failed to generate MOPP code: {}", err);
                (None, MoppStatus::Failed(err.to_string()))
            }
        }
    }
}

/// The tag of the Havok material `label`, or 0 if it is empty or unknown.
fn material_tag<S: SceneGraph + ?Sized>(scene: &S, label: &str) -> u32 {
    if label.is_empty() {
        return 0;
    }

    scene
        .enum_option_value(HAVOK_MATERIAL_ENUM, label)
        .unwrap_or_else(|| {
            warn!("unknown Havok material {}, using material 0", label);
            0
        })
}
