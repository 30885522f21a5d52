//! 运行时：网级聚合、结构校验、可发射集与随机模拟驱动。
use std::collections::HashSet;
use std::fmt::{self, Write as FmtWrite};

use indexmap::IndexMap;
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use crate::net::error::NetError;
use crate::net::ids::{ArcId, PlaceId, TransitionId};
use crate::net::structure::{Arc, ArcKind, Place, Transition, Weight};

/// 结构校验报告：罗列所有违例而非止于第一处。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidityReport {
    /// Arcs sharing direction and (origin, arrival) endpoint pair with an
    /// earlier arc.
    pub duplicate_arcs: Vec<ArcId>,
    /// Transitions without a single incident arc.
    pub unconnected_transitions: Vec<TransitionId>,
    /// Arcs whose place or transition endpoint no longer resolves.
    pub dangling_arcs: Vec<ArcId>,
}

impl ValidityReport {
    pub fn has_issues(&self) -> bool {
        !self.duplicate_arcs.is_empty()
            || !self.unconnected_transitions.is_empty()
            || !self.dangling_arcs.is_empty()
    }
}

/// Authoritative, insertion-ordered owner of all places, transitions and
/// arcs of one net. Handles stay stable across removals; ids are never
/// reused within the lifetime of the model.
#[derive(Clone, Serialize, Deserialize)]
pub struct NetModel {
    places: IndexMap<PlaceId, Place>,
    transitions: IndexMap<TransitionId, Transition>,
    arcs: IndexMap<ArcId, Arc>,
    next_place: u32,
    next_transition: u32,
    next_arc: u32,
}

impl fmt::Debug for NetModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NetModel")
            .field("places", &self.places)
            .field("transitions", &self.transitions)
            .field("arcs", &self.arcs)
            .finish()
    }
}

impl Default for NetModel {
    fn default() -> Self {
        Self::empty()
    }
}

impl NetModel {
    pub fn empty() -> Self {
        Self {
            places: IndexMap::new(),
            transitions: IndexMap::new(),
            arcs: IndexMap::new(),
            next_place: 0,
            next_transition: 0,
            next_arc: 0,
        }
    }

    pub fn add_place(&mut self, tokens: Weight) -> PlaceId {
        let id = PlaceId::new(self.next_place);
        self.next_place += 1;
        self.places.insert(id, Place::new(tokens));
        id
    }

    pub fn add_transition(&mut self) -> TransitionId {
        let id = TransitionId::new(self.next_transition);
        self.next_transition += 1;
        self.transitions.insert(id, Transition::new());
        id
    }

    /// 消耗弧：place → transition，发射时取走 `weight` 个令牌。
    pub fn add_input_arc(
        &mut self,
        place: PlaceId,
        transition: TransitionId,
        weight: Weight,
    ) -> Result<ArcId, NetError> {
        self.insert_arc(ArcKind::Consume(weight), place, transition)
    }

    /// 产出弧：transition → place，发射时放入 `weight` 个令牌。
    pub fn add_output_arc(
        &mut self,
        transition: TransitionId,
        place: PlaceId,
        weight: Weight,
    ) -> Result<ArcId, NetError> {
        self.insert_arc(ArcKind::Produce(weight), place, transition)
    }

    /// 抑制弧：仅当库所为空时允许发射，发射无令牌效应。
    pub fn add_inhibitor_arc(
        &mut self,
        place: PlaceId,
        transition: TransitionId,
    ) -> Result<ArcId, NetError> {
        self.insert_arc(ArcKind::Inhibitor, place, transition)
    }

    /// 复位弧：仅当库所非空时允许发射，发射后清空库所。
    pub fn add_reset_arc(
        &mut self,
        place: PlaceId,
        transition: TransitionId,
    ) -> Result<ArcId, NetError> {
        self.insert_arc(ArcKind::Reset, place, transition)
    }

    /// Structural duplicates are accepted here and flagged by
    /// [`NetModel::validate`]; only unknown endpoints are rejected.
    fn insert_arc(
        &mut self,
        kind: ArcKind,
        place: PlaceId,
        transition: TransitionId,
    ) -> Result<ArcId, NetError> {
        if !self.places.contains_key(&place) {
            return Err(NetError::UnknownPlace(place));
        }
        let entry = self
            .transitions
            .get_mut(&transition)
            .ok_or(NetError::UnknownTransition(transition))?;

        let id = ArcId::new(self.next_arc);
        self.next_arc += 1;
        if kind.is_incoming() {
            entry.incoming.push(id);
        } else {
            entry.outgoing.push(id);
        }
        self.arcs.insert(id, Arc::new(kind, place, transition));
        Ok(id)
    }

    /// Removes the place only. Incident arcs stay behind as dangling and are
    /// reported by [`NetModel::validate`]; cleaning them up is the host's
    /// call.
    pub fn remove_place(&mut self, place: PlaceId) -> Result<Place, NetError> {
        self.places
            .shift_remove(&place)
            .ok_or(NetError::UnknownPlace(place))
    }

    /// Removes the transition only; same dangling-arc contract as
    /// [`NetModel::remove_place`].
    pub fn remove_transition(&mut self, transition: TransitionId) -> Result<Transition, NetError> {
        self.transitions
            .shift_remove(&transition)
            .ok_or(NetError::UnknownTransition(transition))
    }

    /// Removes the arc and detaches it from its transition's incidence
    /// lists.
    pub fn remove_arc(&mut self, arc: ArcId) -> Result<Arc, NetError> {
        let removed = self
            .arcs
            .shift_remove(&arc)
            .ok_or(NetError::UnknownArc(arc))?;
        if let Some(entry) = self.transitions.get_mut(&removed.transition()) {
            entry.incoming.retain(|id| *id != arc);
            entry.outgoing.retain(|id| *id != arc);
        }
        Ok(removed)
    }

    pub fn tokens(&self, place: PlaceId) -> Result<Weight, NetError> {
        self.places
            .get(&place)
            .map(Place::tokens)
            .ok_or(NetError::UnknownPlace(place))
    }

    pub fn set_tokens(&mut self, place: PlaceId, tokens: Weight) -> Result<(), NetError> {
        let entry = self
            .places
            .get_mut(&place)
            .ok_or(NetError::UnknownPlace(place))?;
        entry.set_tokens(tokens);
        Ok(())
    }

    /// Reassigns the weight of a consume or produce arc. Inhibitor and reset
    /// arcs carry no settable weight.
    pub fn set_weight(&mut self, arc: ArcId, weight: Weight) -> Result<(), NetError> {
        let entry = self.arcs.get_mut(&arc).ok_or(NetError::UnknownArc(arc))?;
        match &mut entry.kind {
            ArcKind::Consume(current) | ArcKind::Produce(current) => {
                *current = weight;
                Ok(())
            }
            ArcKind::Inhibitor | ArcKind::Reset => Err(NetError::NotWeighted(arc)),
        }
    }

    /// Multiplicity of an arc: the weight for weighted arcs, the implicit
    /// `1` of the zero test for inhibitor arcs. A reset arc has none, and
    /// callers must special-case the error rather than get a default.
    pub fn multiplicity(&self, arc: ArcId) -> Result<Weight, NetError> {
        let entry = self.arcs.get(&arc).ok_or(NetError::UnknownArc(arc))?;
        match entry.kind() {
            ArcKind::Consume(weight) | ArcKind::Produce(weight) => Ok(weight),
            ArcKind::Inhibitor => Ok(1),
            ArcKind::Reset => Err(NetError::NoMultiplicity(arc)),
        }
    }

    pub fn get_place(&self, place: PlaceId) -> Option<&Place> {
        self.places.get(&place)
    }

    pub fn get_place_mut(&mut self, place: PlaceId) -> Option<&mut Place> {
        self.places.get_mut(&place)
    }

    pub fn get_transition(&self, transition: TransitionId) -> Option<&Transition> {
        self.transitions.get(&transition)
    }

    pub fn get_arc(&self, arc: ArcId) -> Option<&Arc> {
        self.arcs.get(&arc)
    }

    pub fn places_len(&self) -> usize {
        self.places.len()
    }

    pub fn transitions_len(&self) -> usize {
        self.transitions.len()
    }

    pub fn arcs_len(&self) -> usize {
        self.arcs.len()
    }

    pub fn places(&self) -> impl Iterator<Item = (PlaceId, &Place)> {
        self.places.iter().map(|(id, place)| (*id, place))
    }

    pub fn transitions(&self) -> impl Iterator<Item = (TransitionId, &Transition)> {
        self.transitions.iter().map(|(id, transition)| (*id, transition))
    }

    pub fn arcs(&self) -> impl Iterator<Item = (ArcId, &Arc)> {
        self.arcs.iter().map(|(id, arc)| (*id, arc))
    }

    /// Snapshot of all token counts in net order.
    pub fn marking(&self) -> Vec<(PlaceId, Weight)> {
        self.places
            .iter()
            .map(|(id, place)| (*id, place.tokens()))
            .collect()
    }

    /// 结构校验：重复弧按方向分别以 (origin, arrival) 端点对判定。
    pub fn validate(&self) -> ValidityReport {
        let mut report = ValidityReport::default();
        let mut seen_incoming: HashSet<(PlaceId, TransitionId)> = HashSet::new();
        let mut seen_outgoing: HashSet<(PlaceId, TransitionId)> = HashSet::new();

        for (id, arc) in &self.arcs {
            let key = (arc.place(), arc.transition());
            let seen = if arc.kind().is_incoming() {
                &mut seen_incoming
            } else {
                &mut seen_outgoing
            };
            if !seen.insert(key) {
                report.duplicate_arcs.push(*id);
            }

            if !self.places.contains_key(&arc.place())
                || !self.transitions.contains_key(&arc.transition())
            {
                report.dangling_arcs.push(*id);
            }
        }

        for (id, transition) in &self.transitions {
            if transition.incoming.is_empty() && transition.outgoing.is_empty() {
                report.unconnected_transitions.push(*id);
            }
        }

        report
    }

    /// Never errors; the caller decides how to react to an invalid net.
    pub fn is_valid(&self) -> bool {
        !self.validate().has_issues()
    }

    /// 打印校验发现到日志。
    pub fn log_validity(&self) {
        let report = self.validate();
        if !report.has_issues() {
            log::info!("net structure check passed");
            return;
        }
        log::warn!(
            "net structure check failed: {} places, {} transitions, {} arcs",
            self.places_len(),
            self.transitions_len(),
            self.arcs_len()
        );
        for id in &report.duplicate_arcs {
            log::warn!("duplicate arc {id:?}");
        }
        for id in &report.unconnected_transitions {
            log::warn!("transition {id:?} has no incident arc");
        }
        for id in &report.dangling_arcs {
            log::warn!("arc {id:?} has a missing endpoint");
        }
    }

    /// True iff every incoming arc of `transition` is currently activable;
    /// a transition without incoming arcs is vacuously drawable.
    pub fn is_drawable(&self, transition: TransitionId) -> Result<bool, NetError> {
        let entry = self
            .transitions
            .get(&transition)
            .ok_or(NetError::UnknownTransition(transition))?;
        Ok(self.all_incoming_activable(entry))
    }

    fn all_incoming_activable(&self, transition: &Transition) -> bool {
        transition
            .incoming
            .iter()
            .all(|arc| self.arc_activable(*arc))
    }

    /// An arc whose place endpoint no longer resolves is never activable.
    fn arc_activable(&self, arc: ArcId) -> bool {
        let Some(arc) = self.arcs.get(&arc) else {
            return false;
        };
        let Some(place) = self.places.get(&arc.place()) else {
            return false;
        };
        arc.is_activable(place)
    }

    /// Drawable transitions in net order. Recomputed fresh on every call;
    /// firing changes shared token counts, so the set is never cached.
    pub fn drawable(&self) -> Vec<TransitionId> {
        self.transitions
            .iter()
            .filter(|(_, transition)| self.all_incoming_activable(transition))
            .map(|(id, _)| *id)
            .collect()
    }

    /// Fires `transition` if it is currently drawable, otherwise fails and
    /// leaves every token count unchanged.
    pub fn step_simulation(&mut self, transition: TransitionId) -> Result<(), NetError> {
        if !self.is_drawable(transition)? {
            return Err(NetError::NotDrawable(transition));
        }
        self.draw(transition)
    }

    /// Activates incoming then outgoing arcs in list order. Effects are
    /// staged on copies of the touched places and committed only once every
    /// activation succeeded, so a half-fired transition is never observable.
    fn draw(&mut self, transition: TransitionId) -> Result<(), NetError> {
        let entry = self
            .transitions
            .get(&transition)
            .ok_or(NetError::UnknownTransition(transition))?;
        let order: Vec<ArcId> = entry
            .incoming
            .iter()
            .chain(entry.outgoing.iter())
            .copied()
            .collect();

        let mut staged: IndexMap<PlaceId, Place> = IndexMap::new();
        for id in order {
            let arc = self.arcs.get(&id).ok_or(NetError::UnknownArc(id))?;
            if !staged.contains_key(&arc.place()) {
                let place = self
                    .places
                    .get(&arc.place())
                    .ok_or(NetError::UnknownPlace(arc.place()))?;
                staged.insert(arc.place(), place.clone());
            }
            arc.activate(&mut staged[&arc.place()])?;
        }

        for (id, place) in staged {
            self.places.insert(id, place);
        }
        log::debug!("fired transition {transition:?}");
        Ok(())
    }

    /// 随机模拟：逐步重算可发射集，均匀随机选取并发射。
    ///
    /// Refuses to run on a structurally invalid net. Stops early, without
    /// error, the first time no transition is drawable. Returns the number
    /// of steps actually fired. The random source is caller-supplied so
    /// runs are reproducible under a seeded generator.
    pub fn launch_simulation<R: Rng + ?Sized>(
        &mut self,
        steps: usize,
        rng: &mut R,
    ) -> Result<usize, NetError> {
        if !self.is_valid() {
            self.log_validity();
            return Err(NetError::InvalidNet);
        }

        for step in 0..steps {
            let drawable = self.drawable();
            let Some(transition) = drawable.choose(rng) else {
                log::info!("no drawable transitions left after {step} steps, stopping");
                return Ok(step);
            };
            self.step_simulation(*transition)?;
        }
        Ok(steps)
    }

    pub fn to_dot(&self) -> String {
        let mut dot = String::new();
        let _ = writeln!(&mut dot, "digraph PetriNet {{");
        let _ = writeln!(&mut dot, "    rankdir=LR;");
        let _ = writeln!(&mut dot, "    node [fontname=\"Helvetica\"];");

        for (id, place) in &self.places {
            let _ = writeln!(
                &mut dot,
                "    place_{} [label=\"p{}\\n{}\", shape=circle, style=filled, fillcolor=\"#e3f2fd\"];",
                id.raw(),
                id.raw(),
                place.tokens()
            );
        }
        for id in self.transitions.keys() {
            let _ = writeln!(
                &mut dot,
                "    trans_{} [label=\"t{}\", shape=box, style=filled, fillcolor=\"#ffe0b2\"];",
                id.raw(),
                id.raw()
            );
        }

        for arc in self.arcs.values() {
            let place = format!("place_{}", arc.place().raw());
            let trans = format!("trans_{}", arc.transition().raw());
            let _ = match arc.kind() {
                ArcKind::Consume(1) => writeln!(&mut dot, "    {place} -> {trans};"),
                ArcKind::Consume(weight) => {
                    writeln!(&mut dot, "    {place} -> {trans} [label=\"{weight}\"];")
                }
                ArcKind::Produce(1) => writeln!(&mut dot, "    {trans} -> {place};"),
                ArcKind::Produce(weight) => {
                    writeln!(&mut dot, "    {trans} -> {place} [label=\"{weight}\"];")
                }
                ArcKind::Inhibitor => {
                    writeln!(&mut dot, "    {place} -> {trans} [arrowhead=odot];")
                }
                ArcKind::Reset => writeln!(
                    &mut dot,
                    "    {place} -> {trans} [arrowhead=normal, style=dashed];"
                ),
            };
        }

        let _ = writeln!(&mut dot, "}}");
        dot
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn add_place_and_transition_hand_out_stable_ids() {
        let mut net = NetModel::empty();
        let p0 = net.add_place(1);
        let p1 = net.add_place(0);
        let t0 = net.add_transition();

        assert_ne!(p0, p1);
        assert_eq!(net.places_len(), 2);
        assert_eq!(net.transitions_len(), 1);
        assert_eq!(net.tokens(p0).unwrap(), 1);

        net.remove_place(p0).unwrap();
        let p2 = net.add_place(3);
        assert_ne!(p2, p0, "ids are never reused after removal");
        assert_eq!(net.tokens(p1).unwrap(), 0);
        assert!(net.get_transition(t0).is_some());
    }

    #[test]
    fn unknown_handles_are_rejected() {
        let mut net = NetModel::empty();
        let p = net.add_place(0);
        let t = net.add_transition();
        let ghost_place = PlaceId::new(99);
        let ghost_transition = TransitionId::new(99);

        assert_eq!(
            net.add_input_arc(ghost_place, t, 1),
            Err(NetError::UnknownPlace(ghost_place))
        );
        assert_eq!(
            net.add_output_arc(ghost_transition, p, 1),
            Err(NetError::UnknownTransition(ghost_transition))
        );
        assert_eq!(
            net.remove_arc(ArcId::new(0)),
            Err(NetError::UnknownArc(ArcId::new(0)))
        );
        assert_eq!(net.tokens(ghost_place), Err(NetError::UnknownPlace(ghost_place)));
    }

    #[test]
    fn firing_conserves_tokens_across_a_weighted_pair() {
        let mut net = NetModel::empty();
        let p1 = net.add_place(2);
        let p2 = net.add_place(0);
        let t = net.add_transition();
        net.add_input_arc(p1, t, 2).unwrap();
        net.add_output_arc(t, p2, 2).unwrap();

        assert_eq!(net.drawable(), vec![t]);
        net.step_simulation(t).unwrap();
        assert_eq!(net.tokens(p1).unwrap(), 0);
        assert_eq!(net.tokens(p2).unwrap(), 2);

        // Drained input place disables the transition.
        assert!(!net.is_drawable(t).unwrap());
        assert!(net.drawable().is_empty());
    }

    #[test]
    fn inhibitor_gates_on_the_empty_place() {
        let mut net = NetModel::empty();
        let p = net.add_place(0);
        let t = net.add_transition();
        net.add_inhibitor_arc(p, t).unwrap();

        assert!(net.is_drawable(t).unwrap());
        net.step_simulation(t).unwrap();
        assert_eq!(net.tokens(p).unwrap(), 0, "zero test has no token effect");

        net.set_tokens(p, 1).unwrap();
        assert!(!net.is_drawable(t).unwrap());
        assert_eq!(net.step_simulation(t), Err(NetError::NotDrawable(t)));
    }

    #[test]
    fn reset_arc_empties_the_place_on_firing() {
        let mut net = NetModel::empty();
        let p = net.add_place(5);
        let t = net.add_transition();
        net.add_reset_arc(p, t).unwrap();

        assert!(net.is_drawable(t).unwrap());
        net.step_simulation(t).unwrap();
        assert_eq!(net.tokens(p).unwrap(), 0);

        // An emptied place no longer enables the reset arc.
        assert!(!net.is_drawable(t).unwrap());
    }

    #[test]
    fn transition_without_incoming_arcs_is_vacuously_drawable() {
        let mut net = NetModel::empty();
        let p = net.add_place(0);
        let t = net.add_transition();
        net.add_output_arc(t, p, 3).unwrap();

        assert_eq!(net.drawable(), vec![t]);
        net.step_simulation(t).unwrap();
        assert_eq!(net.tokens(p).unwrap(), 3);
    }

    #[test]
    fn duplicate_arcs_are_flagged_per_direction() {
        let mut net = NetModel::empty();
        let p = net.add_place(1);
        let t = net.add_transition();
        net.add_input_arc(p, t, 1).unwrap();
        let duplicate = net.add_input_arc(p, t, 2).unwrap();

        let report = net.validate();
        assert_eq!(report.duplicate_arcs, vec![duplicate]);
        assert!(!net.is_valid());

        // Opposite directions between the same endpoints are not duplicates.
        net.remove_arc(duplicate).unwrap();
        net.add_output_arc(t, p, 1).unwrap();
        assert!(net.is_valid());
    }

    #[test]
    fn mixed_incoming_kinds_on_one_pair_count_as_duplicates() {
        let mut net = NetModel::empty();
        let p = net.add_place(1);
        let t = net.add_transition();
        net.add_input_arc(p, t, 1).unwrap();
        net.add_reset_arc(p, t).unwrap();

        assert_eq!(net.validate().duplicate_arcs.len(), 1);
    }

    #[test]
    fn unconnected_transition_invalidates_the_net() {
        let mut net = NetModel::empty();
        let p = net.add_place(1);
        let t = net.add_transition();
        let lonely = net.add_transition();
        net.add_input_arc(p, t, 1).unwrap();

        let report = net.validate();
        assert_eq!(report.unconnected_transitions, vec![lonely]);
        assert!(!net.is_valid());
    }

    #[test]
    fn removing_a_place_leaves_a_dangling_arc() {
        let mut net = NetModel::empty();
        let p = net.add_place(1);
        let t = net.add_transition();
        let arc = net.add_input_arc(p, t, 1).unwrap();
        assert!(net.is_valid());

        net.remove_place(p).unwrap();
        let report = net.validate();
        assert_eq!(report.dangling_arcs, vec![arc]);
        assert!(!net.is_valid());

        // A dangling consume arc can never be activated.
        assert!(!net.is_drawable(t).unwrap());
    }

    #[test]
    fn removing_an_arc_detaches_it_from_its_transition() {
        let mut net = NetModel::empty();
        let p = net.add_place(0);
        let t = net.add_transition();
        let arc = net.add_reset_arc(p, t).unwrap();
        assert!(!net.is_drawable(t).unwrap());

        net.remove_arc(arc).unwrap();
        assert!(net.get_transition(t).unwrap().incoming().is_empty());
        assert!(net.is_drawable(t).unwrap(), "vacuously drawable again");
        assert_eq!(net.validate().unconnected_transitions, vec![t]);
    }

    #[test]
    fn weight_and_multiplicity_queries_follow_the_arc_kind() {
        let mut net = NetModel::empty();
        let p = net.add_place(0);
        let t = net.add_transition();
        let consume = net.add_input_arc(p, t, 2).unwrap();
        let inhibitor = net.add_inhibitor_arc(p, t).unwrap();
        let reset = net.add_reset_arc(p, t).unwrap();

        assert_eq!(net.multiplicity(consume).unwrap(), 2);
        assert_eq!(net.multiplicity(inhibitor).unwrap(), 1);
        assert_eq!(net.multiplicity(reset), Err(NetError::NoMultiplicity(reset)));

        net.set_weight(consume, 4).unwrap();
        assert_eq!(net.multiplicity(consume).unwrap(), 4);
        assert_eq!(net.set_weight(inhibitor, 2), Err(NetError::NotWeighted(inhibitor)));
        assert_eq!(net.set_weight(reset, 2), Err(NetError::NotWeighted(reset)));
    }

    #[test]
    fn failed_step_leaves_every_token_count_unchanged() {
        let mut net = NetModel::empty();
        let p1 = net.add_place(1);
        let p2 = net.add_place(4);
        let t = net.add_transition();
        net.add_input_arc(p1, t, 2).unwrap();
        net.add_output_arc(t, p2, 1).unwrap();

        let before = net.marking();
        assert_eq!(net.step_simulation(t), Err(NetError::NotDrawable(t)));
        assert_eq!(net.marking(), before);
    }

    #[test]
    fn firing_is_all_or_nothing_under_conflicting_consume_arcs() {
        // Two consume arcs on the same place pass the per-arc precondition
        // but jointly over-consume; the staged draw must commit nothing.
        let mut net = NetModel::empty();
        let p = net.add_place(3);
        let t = net.add_transition();
        net.add_input_arc(p, t, 2).unwrap();
        net.add_input_arc(p, t, 2).unwrap();

        assert!(net.is_drawable(t).unwrap());
        let err = net.step_simulation(t).unwrap_err();
        assert_eq!(
            err,
            NetError::InsufficientTokens {
                requested: 2,
                available: 1
            }
        );
        assert_eq!(net.tokens(p).unwrap(), 3);
    }

    #[test]
    fn launch_simulation_refuses_an_invalid_net() {
        let mut net = NetModel::empty();
        let p = net.add_place(5);
        let t = net.add_transition();
        net.add_input_arc(p, t, 1).unwrap();
        net.add_input_arc(p, t, 1).unwrap();

        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(net.launch_simulation(10, &mut rng), Err(NetError::InvalidNet));
        assert_eq!(net.tokens(p).unwrap(), 5, "nothing fired");
    }

    #[test]
    fn launch_simulation_stops_early_when_nothing_is_drawable() {
        let mut net = NetModel::empty();
        let source = net.add_place(4);
        let sink = net.add_place(0);
        let t = net.add_transition();
        net.add_input_arc(source, t, 1).unwrap();
        net.add_output_arc(t, sink, 1).unwrap();

        let mut rng = StdRng::seed_from_u64(1);
        let fired = net.launch_simulation(10, &mut rng).unwrap();
        assert_eq!(fired, 4, "one firing per source token, then a normal stop");
        assert_eq!(net.tokens(source).unwrap(), 0);
        assert_eq!(net.tokens(sink).unwrap(), 4);
    }

    #[test]
    fn launch_simulation_runs_all_requested_steps_on_a_live_loop() {
        let mut net = NetModel::empty();
        let p = net.add_place(1);
        let t = net.add_transition();
        net.add_input_arc(p, t, 1).unwrap();
        net.add_output_arc(t, p, 1).unwrap();

        let mut rng = StdRng::seed_from_u64(2);
        assert_eq!(net.launch_simulation(25, &mut rng).unwrap(), 25);
        assert_eq!(net.tokens(p).unwrap(), 1);
    }

    #[test]
    fn seeded_simulations_are_reproducible() {
        let build = || {
            let mut net = NetModel::empty();
            let source = net.add_place(10);
            let left = net.add_place(0);
            let right = net.add_place(0);
            let to_left = net.add_transition();
            let to_right = net.add_transition();
            net.add_input_arc(source, to_left, 1).unwrap();
            net.add_output_arc(to_left, left, 1).unwrap();
            net.add_input_arc(source, to_right, 1).unwrap();
            net.add_output_arc(to_right, right, 1).unwrap();
            net
        };

        let mut first = build();
        let mut second = build();
        let mut rng_a = StdRng::seed_from_u64(42);
        let mut rng_b = StdRng::seed_from_u64(42);
        assert_eq!(first.launch_simulation(10, &mut rng_a).unwrap(), 10);
        assert_eq!(second.launch_simulation(10, &mut rng_b).unwrap(), 10);
        assert_eq!(first.marking(), second.marking());
    }

    #[test]
    fn model_survives_a_serde_round_trip() {
        let mut net = NetModel::empty();
        let p = net.add_place(2);
        let t = net.add_transition();
        net.add_input_arc(p, t, 2).unwrap();
        net.add_reset_arc(p, t).unwrap();

        let json = serde_json::to_string(&net).unwrap();
        let mut restored: NetModel = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.marking(), net.marking());
        assert_eq!(restored.drawable(), net.drawable());

        // Id counters travel with the model, so new handles stay unique.
        let fresh = restored.add_place(0);
        assert_ne!(fresh, p);
    }

    #[test]
    fn dot_export_styles_arcs_by_kind() {
        let mut net = NetModel::empty();
        let p = net.add_place(1);
        let q = net.add_place(0);
        let t = net.add_transition();
        net.add_input_arc(p, t, 2).unwrap();
        net.add_output_arc(t, q, 1).unwrap();
        net.add_inhibitor_arc(q, t).unwrap();

        let dot = net.to_dot();
        assert!(dot.contains("digraph PetriNet"));
        assert!(dot.contains("place_0 -> trans_0 [label=\"2\"];"));
        assert!(dot.contains("trans_0 -> place_1;"));
        assert!(dot.contains("arrowhead=odot"));
    }
}
