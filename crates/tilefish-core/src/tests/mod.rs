mod hierarchy;
