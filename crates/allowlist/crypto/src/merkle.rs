//! Sorted-pair binary Merkle trees over identities.
//!
//! ## Algorithm
//!
//! - Leaf: `keccak256(identity)`
//! - Parent: `keccak256(min(l, r) || max(l, r))`
//! - Odd node count: the trailing node is promoted unchanged (never duplicated)
//! - Empty tree root: `Hash::ZERO`
//!
//! Because pairs are sorted before hashing, a proof is just the sibling sequence;
//! it carries no left/right flags.

use allowlist_types::{Hash, Identity};

use crate::hashing::{hash_sorted_pair, leaf_hash};

/// Fold `proof` onto `leaf`, producing the root it commits to.
pub fn reconstruct_root(leaf: Hash, proof: &[Hash]) -> Hash {
    proof
        .iter()
        .fold(leaf, |node, sibling| hash_sorted_pair(&node, sibling))
}

/// Whether `proof` connects `leaf` to `root`.
pub fn verify_proof(root: &Hash, leaf: Hash, proof: &[Hash]) -> bool {
    reconstruct_root(leaf, proof) == *root
}

/// A fully materialized tree, used off-band to publish roots and hand out proofs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MerkleTree {
    /// `layers[0]` are the leaves in insertion order; the last layer holds the root.
    layers: Vec<Vec<Hash>>,
}

impl MerkleTree {
    /// Build over already-hashed leaves.
    pub fn from_leaves(leaves: Vec<Hash>) -> Self {
        let mut layers = vec![leaves];

        loop {
            let current = match layers.last() {
                Some(layer) if layer.len() > 1 => layer,
                _ => break,
            };

            let next: Vec<Hash> = current
                .chunks(2)
                .map(|pair| match pair {
                    [left, right] => hash_sorted_pair(left, right),
                    _ => pair[0],
                })
                .collect();
            layers.push(next);
        }

        Self { layers }
    }

    /// Build over identities, hashing each into a leaf.
    pub fn from_identities(identities: &[Identity]) -> Self {
        Self::from_leaves(identities.iter().map(leaf_hash).collect())
    }

    pub fn root(&self) -> Hash {
        self.layers
            .last()
            .and_then(|layer| layer.first())
            .copied()
            .unwrap_or(Hash::ZERO)
    }

    pub fn leaves(&self) -> &[Hash] {
        self.layers.first().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.leaves().len()
    }

    pub fn is_empty(&self) -> bool {
        self.leaves().is_empty()
    }

    /// Number of hashing levels between the leaves and the root.
    pub fn depth(&self) -> usize {
        self.layers.len().saturating_sub(1)
    }

    /// Sibling path for the leaf at `index`, or `None` if out of range.
    pub fn proof(&self, index: usize) -> Option<Vec<Hash>> {
        if index >= self.len() {
            return None;
        }

        let mut proof = Vec::with_capacity(self.depth());
        let mut position = index;
        for layer in &self.layers[..self.depth()] {
            let sibling = if position % 2 == 1 {
                position - 1
            } else {
                position + 1
            };
            // A promoted odd node has no sibling at this level.
            if let Some(hash) = layer.get(sibling) {
                proof.push(*hash);
            }
            position /= 2;
        }
        Some(proof)
    }

    /// Proof for the first leaf committing `identity`, or `None` if it is not in the tree.
    pub fn proof_for(&self, identity: &Identity) -> Option<Vec<Hash>> {
        let leaf = leaf_hash(identity);
        let index = self.leaves().iter().position(|candidate| *candidate == leaf)?;
        self.proof(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hashing::keccak256;
    use proptest::prelude::*;

    fn ids(n: u8) -> Vec<Identity> {
        (1..=n).map(|i| Identity::from_bytes([i; 20])).collect()
    }

    #[test]
    fn empty_tree_has_zero_root() {
        let tree = MerkleTree::from_leaves(vec![]);
        assert_eq!(tree.root(), Hash::ZERO);
        assert!(tree.is_empty());
        assert_eq!(tree.depth(), 0);
        assert_eq!(tree.proof(0), None);
    }

    #[test]
    fn single_leaf_is_its_own_root() {
        let id = Identity::from_bytes([7u8; 20]);
        let tree = MerkleTree::from_identities(&[id]);
        assert_eq!(tree.root(), leaf_hash(&id));
        assert_eq!(tree.proof_for(&id), Some(vec![]));
    }

    #[test]
    fn four_leaves_match_manual_construction() {
        let set = ids(4);
        let leaves: Vec<Hash> = set.iter().map(leaf_hash).collect();
        let left = hash_sorted_pair(&leaves[0], &leaves[1]);
        let right = hash_sorted_pair(&leaves[2], &leaves[3]);
        let expected = hash_sorted_pair(&left, &right);

        let tree = MerkleTree::from_identities(&set);
        assert_eq!(tree.root(), expected);
        assert_eq!(tree.depth(), 2);
        assert_eq!(tree.proof(1), Some(vec![leaves[0], right]));
    }

    #[test]
    fn odd_node_is_promoted_not_duplicated() {
        let set = ids(3);
        let leaves: Vec<Hash> = set.iter().map(leaf_hash).collect();
        let pair = hash_sorted_pair(&leaves[0], &leaves[1]);
        let expected = hash_sorted_pair(&pair, &leaves[2]);

        let tree = MerkleTree::from_identities(&set);
        assert_eq!(tree.root(), expected);
        assert_eq!(tree.proof(2), Some(vec![pair]));
    }

    // Dev accounts 0..=3.
    const ACCOUNTS: [&str; 4] = [
        "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266",
        "0x70997970C51812dc3A010C7d01b50e0d17dc79C8",
        "0x3C44CdDdB6a900fa2b585dd299e03d12FA4293BC",
        "0x90F79bf6EB2c4f870365E785982E1f101E93b906",
    ];

    fn accounts(n: usize) -> Vec<Identity> {
        ACCOUNTS[..n].iter().map(|a| a.parse().unwrap()).collect()
    }

    #[test]
    fn root_matches_sorted_pairs_reference() {
        // merkletreejs: new MerkleTree(addrs.map(keccak256), keccak256, { sortPairs: true })
        let four: Hash = "0xd4453790033a2bd762f526409b7f358023773723d9e9bc42487e4996869162b6"
            .parse()
            .unwrap();
        let three: Hash = "0x55e8063f883b9381398d8fef6fbae371817e8e4808a33a4145b8e3cdd65e3926"
            .parse()
            .unwrap();
        assert_eq!(MerkleTree::from_identities(&accounts(4)).root(), four);
        assert_eq!(MerkleTree::from_identities(&accounts(3)).root(), three);
    }

    #[test]
    fn proof_for_unknown_identity_is_none() {
        let tree = MerkleTree::from_identities(&ids(4));
        assert_eq!(tree.proof_for(&Identity::from_bytes([0xee; 20])), None);
    }

    #[test]
    fn empty_proof_only_verifies_leaf_root() {
        let leaf = keccak256(b"only");
        assert!(verify_proof(&leaf, leaf, &[]));
        assert!(!verify_proof(&keccak256(b"other"), leaf, &[]));
    }

    #[test]
    fn reconstruct_is_order_sensitive_across_levels() {
        let set = ids(4);
        let tree = MerkleTree::from_identities(&set);
        let mut proof = tree.proof(0).unwrap();
        proof.reverse();
        assert_ne!(reconstruct_root(leaf_hash(&set[0]), &proof), tree.root());
    }

    fn distinct_identities() -> impl Strategy<Value = Vec<Identity>> {
        prop::collection::hash_set(any::<[u8; 20]>(), 1..40)
            .prop_map(|set| set.into_iter().map(Identity::from_bytes).collect())
    }

    proptest! {
        #[test]
        fn every_member_proof_verifies(set in distinct_identities()) {
            let tree = MerkleTree::from_identities(&set);
            let root = tree.root();
            for id in &set {
                let proof = tree.proof_for(id).expect("member has a proof");
                prop_assert!(verify_proof(&root, leaf_hash(id), &proof));
            }
        }

        #[test]
        fn member_proof_rejects_outsider(
            set in distinct_identities(),
            outsider in any::<[u8; 20]>(),
            pick in any::<prop::sample::Index>(),
        ) {
            let outsider = Identity::from_bytes(outsider);
            prop_assume!(!set.contains(&outsider));
            let tree = MerkleTree::from_identities(&set);
            let member = &set[pick.index(set.len())];
            let proof = tree.proof_for(member).expect("member has a proof");
            prop_assert!(!verify_proof(&tree.root(), leaf_hash(&outsider), &proof));
        }
    }
}
