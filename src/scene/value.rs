use super::{Field, NodeKey};
use crate::math::{Matrix, Quaternion, Real, Vector, Vector4r};
use std::collections::BTreeMap;

/// A field value stored in a block [`Record`].
#[derive(Clone, Debug, PartialEq)]
#[allow(missing_docs)]
pub enum Value {
    Bool(bool),
    UInt(u32),
    Float(Real),
    Vector3(Vector),
    Vector4(Vector4r),
    Quaternion(Quaternion<Real>),
    Matrix3(Matrix),
    /// A single block reference. `None` is the null link.
    Link(Option<NodeKey>),
    /// An array of block references.
    Links(Vec<NodeKey>),
    Triangle([u16; 3]),
    Floats(Vec<Real>),
    Vector3s(Vec<Vector>),
    Vector4s(Vec<Vector4r>),
    Triangles(Vec<[u16; 3]>),
    /// Triangle strips, one index list per strip.
    Strips(Vec<Vec<u16>>),
    Bytes(Vec<u8>),
    /// An inline compound, e.g. the ragdoll descriptor of a malleable constraint.
    Record(Record),
    Records(Vec<Record>),
}

/// Types that can be read from and written to a [`Value`].
///
/// Links are deliberately not a `FieldType`: they go through
/// [`SceneGraph::link`](super::SceneGraph::link) so the parent bookkeeping stays
/// consistent.
pub trait FieldType: Sized {
    /// Extracts `Self` from `value`, or `None` on a type mismatch.
    fn from_value(value: &Value) -> Option<Self>;
    /// Wraps `self` into a value.
    fn into_value(self) -> Value;
}

macro_rules! impl_field_type(
    ($t: ty, $variant: ident) => {
        impl FieldType for $t {
            #[inline]
            fn from_value(value: &Value) -> Option<Self> {
                match value {
                    Value::$variant(v) => Some(v.clone()),
                    _ => None,
                }
            }

            #[inline]
            fn into_value(self) -> Value {
                Value::$variant(self)
            }
        }
    }
);

impl_field_type!(bool, Bool);
impl_field_type!(u32, UInt);
impl_field_type!(Real, Float);
impl_field_type!(Vector, Vector3);
impl_field_type!(Vector4r, Vector4);
impl_field_type!(Quaternion<Real>, Quaternion);
impl_field_type!(Matrix, Matrix3);
impl_field_type!([u16; 3], Triangle);
impl_field_type!(Vec<Real>, Floats);
impl_field_type!(Vec<Vector>, Vector3s);
impl_field_type!(Vec<Vector4r>, Vector4s);
impl_field_type!(Vec<[u16; 3]>, Triangles);
impl_field_type!(Vec<Vec<u16>>, Strips);
impl_field_type!(Vec<u8>, Bytes);
impl_field_type!(Record, Record);
impl_field_type!(Vec<Record>, Records);

/// The fields of one block, or of an inline compound inside a block.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Record {
    values: BTreeMap<Field, Value>,
}

impl Record {
    /// An empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`Record::set`].
    pub fn with<T: FieldType>(mut self, field: Field, value: T) -> Self {
        self.set(field, value);
        self
    }

    /// Whether `field` holds a value.
    pub fn contains(&self, field: Field) -> bool {
        self.values.contains_key(&field)
    }

    /// Reads `field` as `T`.
    pub fn get<T: FieldType>(&self, field: Field) -> Option<T> {
        self.values.get(&field).and_then(T::from_value)
    }

    /// Reads an array field, defaulting to an empty array.
    pub fn get_array<T>(&self, field: Field) -> Vec<T>
    where
        Vec<T>: FieldType,
    {
        self.get(field).unwrap_or_default()
    }

    /// Writes `value` into `field`, replacing any previous value.
    pub fn set<T: FieldType>(&mut self, field: Field, value: T) {
        let _ = self.values.insert(field, value.into_value());
    }

    /// Writes an array field.
    pub fn set_array<T>(&mut self, field: Field, values: Vec<T>)
    where
        Vec<T>: FieldType,
    {
        self.set(field, values)
    }

    /// The inline compound stored in `field`.
    pub fn record(&self, field: Field) -> Option<&Record> {
        match self.values.get(&field) {
            Some(Value::Record(r)) => Some(r),
            _ => None,
        }
    }

    /// The inline compound stored in `field`, mutably.
    pub fn record_mut(&mut self, field: Field) -> Option<&mut Record> {
        match self.values.get_mut(&field) {
            Some(Value::Record(r)) => Some(r),
            _ => None,
        }
    }

    /// The raw target of the link stored in `field`.
    ///
    /// The target may have been removed from the scene; use
    /// [`SceneGraph::resolve_link`](super::SceneGraph::resolve_link) to validate it.
    pub fn link(&self, field: Field) -> Option<NodeKey> {
        match self.values.get(&field) {
            Some(Value::Link(target)) => *target,
            _ => None,
        }
    }

    /// The raw targets of the link array stored in `field`.
    pub fn links(&self, field: Field) -> Vec<NodeKey> {
        match self.values.get(&field) {
            Some(Value::Links(targets)) => targets.clone(),
            _ => Vec::new(),
        }
    }

    pub(crate) fn set_link_raw(&mut self, field: Field, target: Option<NodeKey>) {
        let _ = self.values.insert(field, Value::Link(target));
    }

    pub(crate) fn set_links_raw(&mut self, field: Field, targets: Vec<NodeKey>) {
        let _ = self.values.insert(field, Value::Links(targets));
    }

    /// The targets of the owning links of this record.
    pub(crate) fn owned_links(&self) -> Vec<NodeKey> {
        self.values
            .iter()
            .filter(|(field, _)| field.is_owning_link())
            .flat_map(|(_, value)| match value {
                Value::Link(target) => target.iter().copied().collect(),
                Value::Links(targets) => targets.clone(),
                _ => Vec::new(),
            })
            .collect()
    }

    /// Rewrites every link of this record, including links nested in inline compounds.
    ///
    /// `map` returns the new target of a link, or `None` to null it. Nulled entries of
    /// link arrays are dropped.
    pub(crate) fn retarget_links(&mut self, map: &mut dyn FnMut(NodeKey) -> Option<NodeKey>) {
        for value in self.values.values_mut() {
            match value {
                Value::Link(target) => {
                    if let Some(old) = *target {
                        *target = map(old);
                    }
                }
                Value::Links(targets) => {
                    let mut kept = Vec::with_capacity(targets.len());
                    for t in targets.iter() {
                        if let Some(new) = map(*t) {
                            kept.push(new);
                        }
                    }
                    *targets = kept;
                }
                Value::Record(r) => r.retarget_links(&mut *map),
                Value::Records(rs) => {
                    for r in rs.iter_mut() {
                        r.retarget_links(&mut *map);
                    }
                }
                _ => {}
            }
        }
    }
}
