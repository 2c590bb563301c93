use super::{BlockType, EnumTable, Field, NifVersion, NodeKey, Record, SceneGraph};
use slotmap::SlotMap;

#[derive(Clone, Debug)]
struct Block {
    kind: BlockType,
    record: Record,
    parent: Option<NodeKey>,
}

/// An in-memory scene graph: an arena of blocks with single-parent ownership.
#[derive(Clone, Debug)]
pub struct NifScene {
    version: NifVersion,
    blocks: SlotMap<NodeKey, Block>,
    roots: Vec<NodeKey>,
    enums: EnumTable,
}

impl NifScene {
    /// An empty scene using the default Havok enumerations.
    pub fn new(version: NifVersion) -> Self {
        Self::with_enums(version, EnumTable::havok_defaults())
    }

    /// An empty scene using the given enumeration table.
    pub fn with_enums(version: NifVersion, enums: EnumTable) -> Self {
        Self {
            version,
            blocks: SlotMap::with_key(),
            roots: Vec::new(),
            enums,
        }
    }

    /// Inserts a block and registers it as a root.
    pub fn insert_root(&mut self, kind: BlockType) -> NodeKey {
        let key = self.insert_node(kind);
        self.roots.push(key);
        key
    }

    /// The enumeration table, mutably, so hosts can register game-specific options.
    pub fn enums_mut(&mut self) -> &mut EnumTable {
        &mut self.enums
    }

    /// Makes `parent` the owner of `child` unless another live block already owns it.
    fn adopt(&mut self, parent: NodeKey, child: NodeKey) {
        if self.parent_of(child).is_some_and(|p| p != parent) {
            return;
        }
        if let Some(block) = self.blocks.get_mut(child) {
            block.parent = Some(parent);
        }
    }

    fn disown(&mut self, parent: NodeKey, child: NodeKey) {
        if let Some(block) = self.blocks.get_mut(child) {
            if block.parent == Some(parent) {
                block.parent = None;
            }
        }
    }
}

impl SceneGraph for NifScene {
    fn version(&self) -> NifVersion {
        self.version
    }

    fn roots(&self) -> Vec<NodeKey> {
        self.roots.clone()
    }

    fn block_type(&self, node: NodeKey) -> Option<BlockType> {
        self.blocks.get(node).map(|b| b.kind)
    }

    fn record(&self, node: NodeKey) -> Option<&Record> {
        self.blocks.get(node).map(|b| &b.record)
    }

    fn record_mut(&mut self, node: NodeKey) -> Option<&mut Record> {
        self.blocks.get_mut(node).map(|b| &mut b.record)
    }

    fn insert_node(&mut self, kind: BlockType) -> NodeKey {
        self.blocks.insert(Block {
            kind,
            record: Record::new(),
            parent: None,
        })
    }

    fn remove_subtree(&mut self, node: NodeKey) {
        if !self.blocks.contains_key(node) {
            return;
        }

        let mut removed = vec![node];
        let mut i = 0;

        while i != removed.len() {
            let owner = removed[i];
            let owned: Vec<NodeKey> = self
                .blocks
                .iter()
                .filter(|(k, b)| b.parent == Some(owner) && !removed.contains(k))
                .map(|(k, _)| k)
                .collect();
            removed.extend(owned);
            i += 1;
        }

        // Blocks still linked by an owning link from outside the branch survive, with
        // that block as their new parent.
        loop {
            let shared: Vec<(NodeKey, NodeKey)> = self
                .blocks
                .iter()
                .filter(|(k, _)| !removed.contains(k))
                .flat_map(|(k, b)| b.record.owned_links().into_iter().map(move |t| (k, t)))
                .filter(|(_, t)| *t != node && removed.contains(t))
                .collect();

            if shared.is_empty() {
                break;
            }

            for (owner, kept) in shared {
                removed.retain(|r| *r != kept);
                if let Some(block) = self.blocks.get_mut(kept) {
                    block.parent = Some(owner);
                }
            }
        }

        for key in &removed {
            let _ = self.blocks.remove(*key);
        }

        self.roots.retain(|r| !removed.contains(r));

        for (_, block) in self.blocks.iter_mut() {
            block
                .record
                .retarget_links(&mut |t| (!removed.contains(&t)).then_some(t));
        }
    }

    fn link(&mut self, node: NodeKey, field: Field, target: Option<NodeKey>) {
        let Some(block) = self.blocks.get_mut(node) else {
            return;
        };
        let previous = block.record.link(field);
        block.record.set_link_raw(field, target);

        if field.is_owning_link() {
            if let Some(previous) = previous {
                self.disown(node, previous);
            }
            if let Some(target) = target {
                self.adopt(node, target);
            }
        }
    }

    fn set_links(&mut self, node: NodeKey, field: Field, targets: Vec<NodeKey>) {
        let Some(block) = self.blocks.get_mut(node) else {
            return;
        };
        let previous = block.record.links(field);
        block.record.set_links_raw(field, targets.clone());

        if field.is_owning_link() {
            for p in previous {
                self.disown(node, p);
            }
            for t in targets {
                self.adopt(node, t);
            }
        }
    }

    fn redirect_links(&mut self, from: NodeKey, to: NodeKey) {
        for (_, block) in self.blocks.iter_mut() {
            block
                .record
                .retarget_links(&mut |t| Some(if t == from { to } else { t }));
        }

        let parent = self.parent_of(from);
        if let Some(block) = self.blocks.get_mut(to) {
            block.parent = parent;
        }
        if let Some(block) = self.blocks.get_mut(from) {
            block.parent = None;
        }
        for root in self.roots.iter_mut() {
            if *root == from {
                *root = to;
            }
        }
    }

    fn parent_of(&self, node: NodeKey) -> Option<NodeKey> {
        let parent = self.blocks.get(node)?.parent?;
        self.blocks.contains_key(parent).then_some(parent)
    }

    fn enum_option_value(&self, enum_name: &str, label: &str) -> Option<u32> {
        self.enums.value(enum_name, label)
    }

    fn block_count(&self) -> usize {
        self.blocks.len()
    }
}
