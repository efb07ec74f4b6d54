mod memo_vm;

pub use memo_vm::{
    ProgressVm, QuestionVm, RING_RADIUS, TopVm, ring_circumference, status_class, status_text,
};
