use std::collections::{BTreeSet, HashMap, HashSet};

use arbor_protocol::{is_particle, DepRel, EdgeLabel, PhraseKind, UPos};

use crate::clause::ClauseBoundary;
use crate::navigator::DependencyGraph;

/// Tokens grouped under one lexical head, before they become tree nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhraseSpan {
    pub start: usize,
    pub end: usize,
    pub kind: PhraseKind,
    pub head: usize,
    /// Every covered token except the head.
    pub modifiers: BTreeSet<usize>,
}

impl PhraseSpan {
    fn covering(kind: PhraseKind, head: usize, children: &[(EdgeLabel, Constituent)]) -> Self {
        let mut modifiers = BTreeSet::new();
        for (_, child) in children {
            match child {
                Constituent::Word { index } => {
                    modifiers.insert(*index);
                }
                Constituent::Phrase { span, .. } => {
                    modifiers.insert(span.head);
                    modifiers.extend(span.modifiers.iter().copied());
                }
            }
        }
        modifiers.remove(&head);
        let start = modifiers.first().map_or(head, |m| (*m).min(head));
        let end = modifiers.last().map_or(head, |m| (*m).max(head));
        Self {
            start,
            end,
            kind,
            head,
            modifiers,
        }
    }

    pub fn contains(&self, index: usize) -> bool {
        index == self.head || self.modifiers.contains(&index)
    }
}

/// Owned constituent tree for one clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Constituent {
    Word { index: usize },
    Phrase {
        span: PhraseSpan,
        children: Vec<(EdgeLabel, Constituent)>,
    },
}

impl Constituent {
    fn phrase(kind: PhraseKind, head: usize, mut children: Vec<(EdgeLabel, Constituent)>) -> Self {
        children.sort_by_key(|(_, c)| c.first_token());
        Constituent::Phrase {
            span: PhraseSpan::covering(kind, head, &children),
            children,
        }
    }

    pub fn head(&self) -> usize {
        match self {
            Constituent::Word { index } => *index,
            Constituent::Phrase { span, .. } => span.head,
        }
    }

    pub fn first_token(&self) -> usize {
        match self {
            Constituent::Word { index } => *index,
            Constituent::Phrase { span, .. } => span.start,
        }
    }

    pub fn kind(&self) -> Option<PhraseKind> {
        match self {
            Constituent::Word { .. } => None,
            Constituent::Phrase { span, .. } => Some(span.kind),
        }
    }

    pub fn children(&self) -> &[(EdgeLabel, Constituent)] {
        match self {
            Constituent::Word { .. } => &[],
            Constituent::Phrase { children, .. } => children,
        }
    }

    pub fn labels(&self) -> Vec<&str> {
        self.children().iter().map(|(l, _)| l.as_str()).collect()
    }

    /// First child carrying `label`.
    pub fn child(&self, label: &EdgeLabel) -> Option<&Constituent> {
        self.children().iter().find(|(l, _)| l == label).map(|(_, c)| c)
    }

    /// All covered tokens, ascending.
    pub fn tokens(&self) -> BTreeSet<usize> {
        match self {
            Constituent::Word { index } => BTreeSet::from([*index]),
            Constituent::Phrase { span, .. } => {
                let mut all = span.modifiers.clone();
                all.insert(span.head);
                all
            }
        }
    }
}

/// A built dependent waiting to be placed under its head.
#[derive(Debug, Clone)]
pub struct Dependent {
    pub index: usize,
    pub dep: DepRel,
    pub constituent: Constituent,
}

pub struct PhraseBuilder<'n, 'a> {
    nav: &'n DependencyGraph<'a>,
}

impl<'n, 'a> PhraseBuilder<'n, 'a> {
    pub fn new(nav: &'n DependencyGraph<'a>) -> Self {
        Self { nav }
    }

    fn children_in(&self, index: usize, members: &HashSet<usize>) -> Vec<usize> {
        self.nav
            .children(index)
            .into_iter()
            .filter(|c| members.contains(c))
            .collect()
    }

    /// Builds the constituents of one clause. The first is headed by the clause
    /// head; any further ones are other top-level members in token order
    /// (only fragment clauses have them).
    pub fn build_clause(&self, clause: &ClauseBoundary) -> Vec<Constituent> {
        let members: HashSet<usize> = clause.members.iter().copied().collect();
        let mut tops: Vec<usize> = clause
            .members
            .iter()
            .copied()
            .filter(|m| self.nav.head_of(*m).map_or(true, |h| !members.contains(&h)))
            .filter(|m| *m != clause.head)
            .collect();
        tops.insert(0, clause.head);

        let hoisted = self.hoisted_conjuncts(&members);
        tops.into_iter()
            .map(|top| self.build_subtree(top, top == clause.head, &members, &hoisted))
            .collect()
    }

    /// Conjuncts (and their coordinators) of a verb's direct object, keyed to the verb.
    fn hoisted_conjuncts(&self, members: &HashSet<usize>) -> HashMap<usize, usize> {
        let tokens = self.nav.tokens();
        let mut hoisted = HashMap::new();

        let mut verbs: Vec<usize> = members.iter().copied().filter(|m| tokens[*m].pos.is_verbal()).collect();
        verbs.sort_unstable();

        for verb in verbs {
            for object in self.children_in(verb, members) {
                if tokens[object].dep != DepRel::DObj {
                    continue;
                }
                let mut stack = vec![object];
                let mut seen = HashSet::from([object]);
                while let Some(current) = stack.pop() {
                    let below = self.children_in(current, members);
                    if !below.iter().any(|c| tokens[*c].dep == DepRel::Conj) {
                        continue;
                    }
                    for child in below {
                        match tokens[child].dep {
                            DepRel::Conj if seen.insert(child) => {
                                hoisted.insert(child, verb);
                                stack.push(child);
                            }
                            DepRel::Cc => {
                                hoisted.insert(child, verb);
                            }
                            _ => {}
                        }
                    }
                }
            }
        }
        hoisted
    }

    /// Bottom-up over an explicit post-order; no recursion on input depth.
    fn build_subtree(
        &self,
        top: usize,
        is_clause_head: bool,
        members: &HashSet<usize>,
        hoisted: &HashMap<usize, usize>,
    ) -> Constituent {
        let tokens = self.nav.tokens();

        let mut order = Vec::new();
        let mut seen = HashSet::new();
        let mut stack = vec![(top, false)];
        while let Some((node, expanded)) = stack.pop() {
            if expanded {
                order.push(node);
                continue;
            }
            if !seen.insert(node) {
                continue;
            }
            stack.push((node, true));
            for child in self.children_in(node, members).into_iter().rev() {
                stack.push((child, false));
            }
        }

        let mut built: HashMap<usize, Constituent> = HashMap::new();
        for node in order {
            let mut indices: Vec<usize> = self
                .children_in(node, members)
                .into_iter()
                .filter(|c| !hoisted.contains_key(c))
                .collect();
            indices.extend(hoisted.iter().filter(|(_, v)| **v == node).map(|(c, _)| *c));
            indices.sort_unstable();

            let dependents: Vec<Dependent> = indices
                .into_iter()
                .filter_map(|index| {
                    let constituent = built.remove(&index)?;
                    let dep = match (&tokens[index].dep, hoisted.contains_key(&index)) {
                        (DepRel::Conj, true) => DepRel::DObj,
                        (dep, _) => dep.clone(),
                    };
                    Some(Dependent {
                        index,
                        dep,
                        constituent,
                    })
                })
                .collect();

            let constituent = self.build_node(node, dependents, is_clause_head && node == top);
            built.insert(node, constituent);
        }

        built.remove(&top).unwrap_or(Constituent::Word { index: top })
    }

    fn build_node(&self, head: usize, dependents: Vec<Dependent>, is_clause_head: bool) -> Constituent {
        let token = &self.nav.tokens()[head];
        let predicate = is_clause_head && token.pos.is_verbal();
        if dependents.is_empty() && !predicate {
            return Constituent::Word { index: head };
        }
        match token.pos {
            UPos::Verb | UPos::Aux => self.build_verb_phrase(head, dependents),
            UPos::Adp => self.build_prep_phrase(head, dependents),
            UPos::Adj => self.build_modifier_phrase(PhraseKind::AdjPhrase, head, dependents),
            UPos::Adv => self.build_modifier_phrase(PhraseKind::AdvPhrase, head, dependents),
            _ => self.build_noun_phrase(head, dependents),
        }
    }

    /// Three layers, inside out: compounds and adjectives around the head, then
    /// possessives and numerals, then determiners. Post-nominal dependents join the
    /// outermost layer. A bare head stays a word.
    pub fn build_noun_phrase(&self, head: usize, dependents: Vec<Dependent>) -> Constituent {
        let mut core = Vec::new();
        let mut middle = Vec::new();
        let mut outer = Vec::new();
        let mut post = Vec::new();

        for d in dependents {
            match d.dep {
                DepRel::Compound => core.push((EdgeLabel::Compound, d.constituent)),
                DepRel::Amod => core.push((EdgeLabel::Adj, d.constituent)),
                DepRel::Poss => middle.push((EdgeLabel::Poss, d.constituent)),
                DepRel::NumMod => middle.push((EdgeLabel::Num, d.constituent)),
                DepRel::Det | DepRel::Predet => outer.push((EdgeLabel::Det, d.constituent)),
                ref other => post.push((EdgeLabel::from_dep(other), d.constituent)),
            }
        }

        let mut current = Constituent::Word { index: head };
        for mut layer in [core, middle, outer] {
            if layer.is_empty() {
                continue;
            }
            let label = match current {
                Constituent::Word { .. } => EdgeLabel::Head,
                Constituent::Phrase { .. } => EdgeLabel::Core,
            };
            layer.push((label, current));
            current = Constituent::phrase(PhraseKind::NounPhrase, head, layer);
        }

        if post.is_empty() {
            return current;
        }
        match current {
            Constituent::Word { .. } => {
                post.push((EdgeLabel::Head, current));
                Constituent::phrase(PhraseKind::NounPhrase, head, post)
            }
            Constituent::Phrase { mut children, .. } => {
                children.extend(post);
                Constituent::phrase(PhraseKind::NounPhrase, head, children)
            }
        }
    }

    /// Preposition as head, its object labeled `pobj`.
    pub fn build_prep_phrase(&self, head: usize, dependents: Vec<Dependent>) -> Constituent {
        let mut children = vec![(EdgeLabel::Prep, Constituent::Word { index: head })];
        for d in dependents {
            children.push((EdgeLabel::from_dep(&d.dep), d.constituent));
        }
        Constituent::phrase(PhraseKind::PrepPhrase, head, children)
    }

    /// The verb and its arguments as siblings, in surface order. A detected particle
    /// joins the verb in a `PhrasalVerb` unit that fills the `verb` slot.
    pub fn build_verb_phrase(&self, head: usize, dependents: Vec<Dependent>) -> Constituent {
        let particle = self
            .detect_phrasal_verb(head)
            .and_then(|span| span.modifiers.first().copied());

        let mut children = Vec::new();
        let mut particle_unit = None;
        for d in dependents {
            if Some(d.index) == particle {
                particle_unit = Some(d.constituent);
                continue;
            }
            let label = match d.dep {
                DepRel::CSubj => EdgeLabel::Subj,
                DepRel::CComp => EdgeLabel::Comp,
                ref other => EdgeLabel::from_dep(other),
            };
            children.push((label, d.constituent));
        }

        let verb = Constituent::Word { index: head };
        let verb_slot = match particle_unit {
            Some(unit) => Constituent::phrase(
                PhraseKind::PhrasalVerb,
                head,
                vec![(EdgeLabel::Verb, verb), (EdgeLabel::Particle, unit)],
            ),
            None => verb,
        };
        children.push((EdgeLabel::Verb, verb_slot));
        Constituent::phrase(PhraseKind::VerbPhrase, head, children)
    }

    fn build_modifier_phrase(&self, kind: PhraseKind, head: usize, dependents: Vec<Dependent>) -> Constituent {
        let mut children = vec![(EdgeLabel::Head, Constituent::Word { index: head })];
        for d in dependents {
            children.push((EdgeLabel::from_dep(&d.dep), d.constituent));
        }
        Constituent::phrase(kind, head, children)
    }

    /// A particle dependent of `verb`: an explicit `prt`, or a particle-like
    /// `prep`/`advmod` right after the verb that governs no object.
    pub fn detect_phrasal_verb(&self, verb: usize) -> Option<PhraseSpan> {
        let tokens = self.nav.tokens();
        let children = self.nav.children(verb);

        let particle = children
            .iter()
            .copied()
            .find(|c| tokens[*c].dep == DepRel::Prt)
            .or_else(|| {
                children.iter().copied().find(|c| {
                    let token = &tokens[*c];
                    matches!(token.dep, DepRel::Prep | DepRel::Advmod)
                        && is_particle(&token.text)
                        && *c > verb
                        && *c <= verb + 2
                        && !self
                            .nav
                            .children(*c)
                            .iter()
                            .any(|g| matches!(tokens[*g].dep, DepRel::PObj | DepRel::PComp))
                })
            })?;

        Some(PhraseSpan {
            start: verb.min(particle),
            end: verb.max(particle),
            kind: PhraseKind::PhrasalVerb,
            head: verb,
            modifiers: BTreeSet::from([particle]),
        })
    }
}
