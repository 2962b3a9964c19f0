mod test_phase_order;
