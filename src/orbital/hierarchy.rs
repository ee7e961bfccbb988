//! Body tree ownership, per-frame traversal and name lookup.

use std::collections::HashMap;
use std::f64::consts::TAU;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::catalog::{BodySpec, Catalog, CatalogError};
use crate::orbital::body::{Body, BodySnapshot, OrbitRateLaw};

/// Index path from the root list down through satellite lists.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BodyPath(Vec<usize>);

impl BodyPath {
    pub fn root(index: usize) -> Self {
        Self(vec![index])
    }

    /// Path of this body's `index`-th satellite.
    pub fn child(&self, index: usize) -> Self {
        let mut indices = self.0.clone();
        indices.push(index);
        Self(indices)
    }

    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    /// Path of the body this one orbits; `None` for roots.
    pub fn parent(&self) -> Option<BodyPath> {
        match self.0.split_last() {
            Some((_, parent)) if !parent.is_empty() => Some(Self(parent.to_vec())),
            _ => None,
        }
    }
}

/// Options applied while building a hierarchy from catalog entries.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BuildOptions {
    /// Seed for initial orbit phases. `None` draws from OS entropy.
    pub seed: Option<u64>,
    /// Opt-in post-construction pass that re-derives orbit rates from distance.
    pub orbit_rate_law: Option<OrbitRateLaw>,
}

impl From<&Catalog> for BuildOptions {
    fn from(catalog: &Catalog) -> Self {
        Self {
            seed: catalog.seed,
            orbit_rate_law: catalog.orbit_rate_law,
        }
    }
}

/// Owns every body. Roots keep catalog order; satellites never appear as roots.
#[derive(Clone, Debug, Default)]
pub struct Hierarchy {
    roots: Vec<Body>,
    index: HashMap<String, BodyPath>,
}

impl Hierarchy {
    pub fn new(roots: Vec<Body>) -> Self {
        let index = build_index(&roots);
        Self { roots, index }
    }

    /// Build from a parsed catalog, honoring its seed and orbit-rate law.
    pub fn from_catalog(catalog: &Catalog) -> Result<Self, CatalogError> {
        Self::build(&catalog.bodies, &BuildOptions::from(catalog))
    }

    /// Validate every entry, then construct the tree.
    ///
    /// The first invalid entry aborts the whole build.
    pub fn build(specs: &[BodySpec], options: &BuildOptions) -> Result<Self, CatalogError> {
        for (i, spec) in specs.iter().enumerate() {
            spec.validate(&format!("bodies[{i}]"))?;
        }
        if let Some(law) = &options.orbit_rate_law
            && !law.k.is_finite()
        {
            return Err(CatalogError::InvalidLaw(law.k));
        }

        let mut rng = match options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let roots = specs
            .iter()
            .map(|spec| build_body(spec, &mut rng))
            .collect::<Vec<_>>();

        let mut hierarchy = Self::new(roots);
        if let Some(law) = &options.orbit_rate_law {
            hierarchy.apply_orbit_rate_law(law);
        }
        Ok(hierarchy)
    }

    /// Re-derive orbit rates for roots (and satellites if the law says so).
    ///
    /// Returns how many bodies were updated.
    pub fn apply_orbit_rate_law(&mut self, law: &OrbitRateLaw) -> usize {
        fn apply_satellites(body: &mut Body, law: &OrbitRateLaw) -> usize {
            body.satellites_mut()
                .map(|sat| usize::from(sat.set_derived_orbit_rate(law)) + apply_satellites(sat, law))
                .sum()
        }

        let mut updated = 0;
        for root in &mut self.roots {
            updated += usize::from(root.set_derived_orbit_rate(law));
            if law.include_satellites {
                updated += apply_satellites(root, law);
            }
        }
        updated
    }

    /// Advance every root (and through them every satellite) in catalog order.
    pub fn advance(&mut self, dt: f64) {
        for root in &mut self.roots {
            root.advance(dt);
        }
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Body> {
        let path = self.path_of(name)?;
        self.resolve(path.indices())
    }

    pub fn find_by_name_mut(&mut self, name: &str) -> Option<&mut Body> {
        let path = self.path_of(name)?;
        let (first, rest) = path.indices().split_first()?;
        let mut body = self.roots.get_mut(*first)?;
        for &i in rest {
            body = body.satellites_mut().nth(i)?;
        }
        Some(body)
    }

    /// Body at a structural path. Unlike name lookup this also reaches
    /// later duplicates.
    pub fn get(&self, path: &BodyPath) -> Option<&Body> {
        self.resolve(path.indices())
    }

    /// Path of the first body called `name`.
    ///
    /// The index is trusted only while the body at the indexed path still
    /// carries that name; otherwise the tree is scanned in pre-order.
    pub fn path_of(&self, name: &str) -> Option<BodyPath> {
        if name.is_empty() {
            return None;
        }
        if let Some(path) = self.index.get(name)
            && self.resolve(path.indices()).is_some_and(|b| b.name() == name)
        {
            return Some(path.clone());
        }
        self.scan_for(name)
    }

    fn scan_for(&self, name: &str) -> Option<BodyPath> {
        fn visit(body: &Body, path: BodyPath, name: &str) -> Option<BodyPath> {
            if body.name() == name {
                return Some(path);
            }
            body.satellites()
                .iter()
                .enumerate()
                .find_map(|(i, sat)| visit(sat, path.child(i), name))
        }

        self.roots
            .iter()
            .enumerate()
            .find_map(|(i, root)| visit(root, BodyPath::root(i), name))
    }

    /// Body whose satellite list holds `name`; `None` for roots and misses.
    pub fn parent_of(&self, name: &str) -> Option<&Body> {
        self.get(&self.path_of(name)?.parent()?)
    }

    fn resolve(&self, indices: &[usize]) -> Option<&Body> {
        let (first, rest) = indices.split_first()?;
        let mut body = self.roots.get(*first)?;
        for &i in rest {
            body = body.satellites().get(i)?;
        }
        Some(body)
    }

    /// Every body eligible for picking, pre-order (root, then its satellites).
    pub fn all_interactive_bodies(&self) -> Vec<&Body> {
        fn walk<'a>(body: &'a Body, out: &mut Vec<&'a Body>) {
            out.push(body);
            for sat in body.satellites() {
                walk(sat, out);
            }
        }

        let mut out = Vec::new();
        for root in &self.roots {
            walk(root, &mut out);
        }
        out
    }

    pub fn roots(&self) -> &[Body] {
        &self.roots
    }

    /// Mutable access to root state, in catalog order. Roots cannot be
    /// added, removed or reordered through this.
    pub fn roots_mut(&mut self) -> impl Iterator<Item = &mut Body> {
        self.roots.iter_mut()
    }

    /// Total number of bodies in the tree.
    pub fn len(&self) -> usize {
        self.roots.iter().map(Body::subtree_len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    pub fn snapshot(&self) -> Vec<BodySnapshot> {
        self.roots.iter().map(Body::snapshot).collect()
    }
}

fn build_body(spec: &BodySpec, rng: &mut StdRng) -> Body {
    // validated upstream, radius is present
    let radius = spec.radius.unwrap_or_default();
    let phase = rng.gen_range(0.0..TAU);
    let mut body = Body::new(spec.name.clone(), radius, spec.distance)
        .with_speeds(spec.rotation_rate, spec.orbit_rate)
        .with_orbit_angle(phase)
        .with_emissive(spec.emissive)
        .with_rings(spec.has_rings)
        .with_texture(spec.texture.clone());
    for sat in &spec.satellites {
        body.attach_satellite(build_body(sat, rng));
    }
    body
}

fn build_index(roots: &[Body]) -> HashMap<String, BodyPath> {
    fn visit(body: &Body, path: &mut Vec<usize>, index: &mut HashMap<String, BodyPath>) {
        // first occurrence wins for duplicate names
        index
            .entry(body.name().to_string())
            .or_insert_with(|| BodyPath(path.clone()));
        for (i, sat) in body.satellites().iter().enumerate() {
            path.push(i);
            visit(sat, path, index);
            path.pop();
        }
    }

    let mut index = HashMap::new();
    let mut path = Vec::new();
    for (i, root) in roots.iter().enumerate() {
        path.push(i);
        visit(root, &mut path, &mut index);
        path.pop();
    }
    index
}
