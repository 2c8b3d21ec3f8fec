use num::Float;
use slotmap::{new_key_type, SlotMap};

use crate::error::{FuzzyError, Result};
use crate::inference::ImplicationOp;
use crate::matrix::FuzzyMatrix;
use crate::ops::{composition, disjunction};

new_key_type! {
    /// A rule key
    pub struct RuleKey;
}

/// An antecedent/consequent pair together with the relation built from them.
#[derive(Clone, Debug)]
pub struct Rule<F = f64> {
    antecedent: FuzzyMatrix<F>,
    consequent: FuzzyMatrix<F>,
    op: ImplicationOp,
    relation: FuzzyMatrix<F>,
}

impl<F: Float> Rule<F> {
    pub fn antecedent(&self) -> &FuzzyMatrix<F> {
        &self.antecedent
    }

    pub fn consequent(&self) -> &FuzzyMatrix<F> {
        &self.consequent
    }

    pub fn op(&self) -> ImplicationOp {
        self.op
    }

    pub fn relation(&self) -> &FuzzyMatrix<F> {
        &self.relation
    }

    /// Applies an observation through this rule's relation.
    pub fn infer(&self, observation: &FuzzyMatrix<F>) -> Result<FuzzyMatrix<F>> {
        composition(observation, &self.relation)
    }
}

#[derive(Debug)]
pub struct Rules<F = f64>(SlotMap<RuleKey, Rule<F>>);

impl<F> Default for Rules<F> {
    fn default() -> Self {
        Rules(SlotMap::with_key())
    }
}

impl<F: Float> Rules<F> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Rules(SlotMap::with_capacity_and_key(capacity))
    }

    /// Builds the relation for `antecedent` => `consequent` and stores it.
    pub fn add(
        &mut self,
        antecedent: FuzzyMatrix<F>,
        consequent: FuzzyMatrix<F>,
        op: ImplicationOp,
    ) -> Result<RuleKey> {
        let relation = op.relation(&antecedent, &consequent)?;
        let (width, height) = relation.shape();
        let key = self.0.insert(Rule {
            antecedent,
            consequent,
            op,
            relation,
        });

        tracing::debug!(?key, ?op, width, height, "added rule");

        Ok(key)
    }

    pub fn get(&self, key: RuleKey) -> Option<&Rule<F>> {
        self.0.get(key)
    }

    pub fn relation(&self, key: RuleKey) -> Option<&FuzzyMatrix<F>> {
        self.0.get(key).map(Rule::relation)
    }

    pub fn remove(&mut self, key: RuleKey) -> Option<Rule<F>> {
        let removed = self.0.remove(key);

        if removed.is_some() {
            tracing::debug!(?key, "removed rule");
        }

        removed
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (RuleKey, &Rule<F>)> + '_ {
        self.0.iter()
    }

    /// Applies an observation through a single rule. An unknown key is a range error.
    pub fn infer(&self, key: RuleKey, observation: &FuzzyMatrix<F>) -> Result<FuzzyMatrix<F>> {
        let rule = self.0.get(key).ok_or(FuzzyError::UnknownRule(key))?;

        tracing::debug!(?key, "inferring through rule");

        rule.infer(observation)
    }

    /// Applies an observation through every rule and takes the union (max) of
    /// the conclusions. Returns `None` when there are no rules.
    pub fn infer_all(&self, observation: &FuzzyMatrix<F>) -> Result<Option<FuzzyMatrix<F>>> {
        let mut aggregated: Option<FuzzyMatrix<F>> = None;

        for (key, rule) in &self.0 {
            let conclusion = rule.infer(observation)?;

            tracing::trace!(?key, "aggregating conclusion");

            aggregated = Some(match aggregated {
                None => conclusion,
                Some(agg) => disjunction(&agg, &conclusion)?,
            });
        }

        Ok(aggregated)
    }
}

#[test]
fn test_rules_store_relations() {
    let x = FuzzyMatrix::from_row(&[1., 0.7, 0.3, 0., 0.]).unwrap();
    let y = FuzzyMatrix::from_row(&[0., 0., 0.4, 0.7, 1.]).unwrap();
    let x1 = FuzzyMatrix::from_row(&[1., 0.6, 0.4, 0.2, 0.]).unwrap();

    let mut rules = Rules::new();
    let mandani = rules.add(x.clone(), y.clone(), ImplicationOp::Mandani).unwrap();
    let zadeh = rules.add(x.clone(), y.clone(), ImplicationOp::Zadeh).unwrap();

    assert_eq!(rules.len(), 2);
    assert_eq!(rules.get(zadeh).unwrap().op(), ImplicationOp::Zadeh);
    assert_eq!(rules.get(mandani).unwrap().antecedent(), &x);
    assert_eq!(rules.get(mandani).unwrap().consequent(), &y);
    assert_eq!(rules.relation(mandani).unwrap().shape(), (5, 5));

    assert_eq!(
        rules.infer(mandani, &x1).unwrap().value(),
        vec![vec![0.0, 0.0, 0.4, 0.7, 1.0]]
    );
    assert_eq!(rules.infer(zadeh, &x1).unwrap().value(), vec![vec![0.4, 0.4, 0.4, 0.7, 1.0]]);

    // Zadeh dominates Mandani entrywise, so the union is the Zadeh conclusion
    assert_eq!(
        rules.infer_all(&x1).unwrap().unwrap().value(),
        vec![vec![0.4, 0.4, 0.4, 0.7, 1.0]]
    );
}

#[test]
fn test_rules_remove() {
    let x = FuzzyMatrix::from_row(&[0.2, 0.9]).unwrap();
    let y = FuzzyMatrix::from_row(&[0.5, 1.]).unwrap();

    let mut rules = Rules::with_capacity(1);
    let key = rules.add(x, y, ImplicationOp::Mandani).unwrap();

    assert!(rules.remove(key).is_some());
    assert!(rules.remove(key).is_none());
    assert!(rules.is_empty());

    let observation = FuzzyMatrix::from_row(&[1., 1.]).unwrap();

    assert_eq!(rules.infer(key, &observation).unwrap_err().kind(), crate::error::ErrorKind::Range);
    assert!(rules.infer_all(&observation).unwrap().is_none());
}

#[test]
fn test_rules_reject_bad_observation() {
    let x = FuzzyMatrix::from_row(&[0.2, 0.9]).unwrap();
    let y = FuzzyMatrix::from_row(&[0.5, 1.]).unwrap();

    let mut rules = Rules::new();
    rules.add(x, y, ImplicationOp::Zadeh).unwrap();

    let observation = FuzzyMatrix::from_row(&[1., 1., 1.]).unwrap();

    assert_eq!(rules.infer_all(&observation).unwrap_err().kind(), crate::error::ErrorKind::Shape);
}

#[test]
fn test_rules_reject_bad_pair() {
    let x = FuzzyMatrix::<f64>::zeros(2, 2).unwrap();
    let y = FuzzyMatrix::<f64>::zeros(3, 3).unwrap();

    let mut rules = Rules::new();

    assert_eq!(
        rules.add(x, y, ImplicationOp::Mandani).unwrap_err().kind(),
        crate::error::ErrorKind::Shape
    );
    assert!(rules.is_empty());
}
